//! The textual event stream consumed by the sound engine.
//!
//! Every event is one line terminated by `;`, and every frame of events
//! starts with an empty line:
//!
//! ```text
//!
//! cof 7;
//! bs 120.00 512.00 512.00 40.00 512.00 512.00 512.00 512.00;
//! aves 767.25 1023.00;
//! pitches -51.20 0.00;
//! rolls 12.80 0.00;
//! hitL 4 0.2500;
//! rswipe 1;
//! ```

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, space0, space1, u8},
    combinator::{map, map_res, value},
    error::Error,
    multi::count,
    number::complete::double,
    sequence::{preceded, separated_pair, terminated, tuple},
    Finish, IResult,
};
use std::{
    fmt,
    io::{self, Write},
    str::FromStr,
};

/// Which of the two boards an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

/// Direction of a swipe, encoded as `0` (left) or `1` (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

/// One line of the event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// `cof n;`, the key moved around the circle of fifths to `n`.
    KeyChange(u8),
    /// `bs ...;`, the eight clipped distances, left board first.
    BoardSample([f64; 8]),
    /// `aves l r;`
    Elevations(f64, f64),
    /// `pitches l r;`
    Pitches(f64, f64),
    /// `rolls l r;`
    Rolls(f64, f64),
    /// `hitL note vel;` or `hitR note vel;`
    Hit {
        #[allow(missing_docs)]
        side: Side,
        #[allow(missing_docs)]
        note: u8,
        #[allow(missing_docs)]
        velocity: f64,
    },
    /// `lswipe d;` or `rswipe d;`
    Swipe {
        #[allow(missing_docs)]
        side: Side,
        #[allow(missing_docs)]
        direction: SwipeDirection,
    },
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineEvent::KeyChange(cof) => write!(f, "cof {};", cof),
            EngineEvent::BoardSample(bs) => {
                write!(f, "bs")?;
                for d in bs {
                    write!(f, " {:.2}", d)?;
                }
                write!(f, ";")
            }
            EngineEvent::Elevations(l, r) => write!(f, "aves {:.2} {:.2};", l, r),
            EngineEvent::Pitches(l, r) => write!(f, "pitches {:.2} {:.2};", l, r),
            EngineEvent::Rolls(l, r) => write!(f, "rolls {:.2} {:.2};", l, r),
            EngineEvent::Hit {
                side,
                note,
                velocity,
            } => {
                let s = match side {
                    Side::Left => 'L',
                    Side::Right => 'R',
                };
                write!(f, "hit{} {} {:.4};", s, note, velocity)
            }
            EngineEvent::Swipe { side, direction } => {
                let s = match side {
                    Side::Left => 'l',
                    Side::Right => 'r',
                };
                let d = match direction {
                    SwipeDirection::Left => 0,
                    SwipeDirection::Right => 1,
                };
                write!(f, "{}swipe {};", s, d)
            }
        }
    }
}

fn parse_pair(s: &str) -> IResult<&str, (f64, f64)> {
    preceded(space1, separated_pair(double, space1, double))(s)
}

fn parse_key_change(s: &str) -> IResult<&str, EngineEvent> {
    map(preceded(tuple((tag("cof"), space1)), u8), EngineEvent::KeyChange)(s)
}

fn parse_board_sample(s: &str) -> IResult<&str, EngineEvent> {
    map_res(
        preceded(tag("bs"), count(preceded(space1, double), 8)),
        |v: Vec<f64>| <[f64; 8]>::try_from(v).map(EngineEvent::BoardSample),
    )(s)
}

fn parse_scalars(s: &str) -> IResult<&str, EngineEvent> {
    alt((
        map(preceded(tag("aves"), parse_pair), |(l, r)| {
            EngineEvent::Elevations(l, r)
        }),
        map(preceded(tag("pitches"), parse_pair), |(l, r)| {
            EngineEvent::Pitches(l, r)
        }),
        map(preceded(tag("rolls"), parse_pair), |(l, r)| {
            EngineEvent::Rolls(l, r)
        }),
    ))(s)
}

fn parse_hit(s: &str) -> IResult<&str, EngineEvent> {
    map(
        tuple((
            preceded(
                tag("hit"),
                alt((value(Side::Left, char('L')), value(Side::Right, char('R')))),
            ),
            preceded(space1, u8),
            preceded(space1, double),
        )),
        |(side, note, velocity)| EngineEvent::Hit {
            side,
            note,
            velocity,
        },
    )(s)
}

fn parse_swipe(s: &str) -> IResult<&str, EngineEvent> {
    map(
        tuple((
            alt((value(Side::Left, char('l')), value(Side::Right, char('r')))),
            preceded(
                tuple((tag("swipe"), space1)),
                alt((
                    value(SwipeDirection::Left, char('0')),
                    value(SwipeDirection::Right, char('1')),
                )),
            ),
        )),
        |(side, direction)| EngineEvent::Swipe { side, direction },
    )(s)
}

fn parse_engine_event(s: &str) -> IResult<&str, EngineEvent> {
    terminated(
        alt((
            parse_key_change,
            parse_board_sample,
            parse_scalars,
            parse_hit,
            parse_swipe,
        )),
        preceded(space0, char(';')),
    )(s)
}

impl FromStr for EngineEvent {
    type Err = Error<String>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_engine_event(s.trim()).finish() {
            Ok(("", event)) => Ok(event),
            Ok((remaining, _)) => Err(Error {
                input: remaining.to_string(),
                code: nom::error::ErrorKind::Eof,
            }),
            Err(Error { input, code }) => Err(Error {
                input: input.to_string(),
                code,
            }),
        }
    }
}

/// Write one frame: an empty line, then each event on its own line. The
/// writer is flushed so the engine sees the frame straight away.
pub fn write_frame<W: Write>(out: &mut W, events: &[EngineEvent]) -> io::Result<()> {
    writeln!(out)?;
    for event in events {
        writeln!(out, "{}", event)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_like_the_engine_expects() {
        let bs = EngineEvent::BoardSample([0.0, 12.5, 512.0, 3.333, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            bs.to_string(),
            "bs 0.00 12.50 512.00 3.33 0.00 0.00 0.00 1.00;"
        );
        assert_eq!(EngineEvent::KeyChange(7).to_string(), "cof 7;");
        assert_eq!(
            EngineEvent::Elevations(767.25, 1023.0).to_string(),
            "aves 767.25 1023.00;"
        );
        assert_eq!(
            EngineEvent::Pitches(-51.2, 0.0).to_string(),
            "pitches -51.20 0.00;"
        );
        assert_eq!(
            EngineEvent::Hit {
                side: Side::Right,
                note: 14,
                velocity: 0.25
            }
            .to_string(),
            "hitR 14 0.2500;"
        );
        assert_eq!(
            EngineEvent::Swipe {
                side: Side::Left,
                direction: SwipeDirection::Right
            }
            .to_string(),
            "lswipe 1;"
        );
    }

    #[test]
    fn parses_event_lines() {
        assert_eq!(
            "cof 11;".parse::<EngineEvent>().unwrap(),
            EngineEvent::KeyChange(11)
        );
        assert_eq!(
            "rolls 12.80 -3.00;".parse::<EngineEvent>().unwrap(),
            EngineEvent::Rolls(12.8, -3.0)
        );
        assert_eq!(
            "hitL 7 0.0625;".parse::<EngineEvent>().unwrap(),
            EngineEvent::Hit {
                side: Side::Left,
                note: 7,
                velocity: 0.0625
            }
        );
        assert_eq!(
            "rswipe 0;\n".parse::<EngineEvent>().unwrap(),
            EngineEvent::Swipe {
                side: Side::Right,
                direction: SwipeDirection::Left
            }
        );
        assert_eq!(
            "bs 1.00 2.00 3.00 4.00 5.00 6.00 7.00 8.00;"
                .parse::<EngineEvent>()
                .unwrap(),
            EngineEvent::BoardSample([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0])
        );
    }

    #[test]
    fn rejects_bad_lines() {
        assert!("cof 7".parse::<EngineEvent>().is_err());
        assert!("bs 1 2 3;".parse::<EngineEvent>().is_err());
        assert!("hitX 1 0.5;".parse::<EngineEvent>().is_err());
        assert!("lswipe 2;".parse::<EngineEvent>().is_err());
        assert!("modeselektor bang;".parse::<EngineEvent>().is_err());
        assert!("cof 1; cof 2;".parse::<EngineEvent>().is_err());
    }

    #[test]
    fn frame_starts_with_blank_line() {
        let mut out = Vec::new();
        write_frame(
            &mut out,
            &[EngineEvent::KeyChange(7), EngineEvent::Rolls(0.0, 1.0)],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\ncof 7;\nrolls 0.00 1.00;\n"
        );
    }
}
