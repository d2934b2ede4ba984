use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};

use crate::gui::{error::QuadrantGuiError, gauge_widget::GaugeWidget};
use crate::report_source::ReportSource;
use crate::views::View;

struct App {
    view: Box<dyn View>,
    source: Box<dyn ReportSource>,
    title: String,
    running: bool,
    axes_linked: bool,
}

impl App {
    fn new(view: Box<dyn View>, source: Box<dyn ReportSource>, device: &str) -> App {
        App {
            title: view.title(device),
            view,
            source,
            running: false,
            axes_linked: true,
        }
    }

    fn on_tick(&mut self) {
        if !self.running {
            return;
        }
        for report in self.source.by_ref() {
            self.view.ingest(&report);
        }
    }

    /// Returns `true` when the user asked to quit.
    fn on_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char(' ') => self.running = !self.running,
            KeyCode::Esc => self.axes_linked = !self.axes_linked,
            KeyCode::Char('r') => self.axes_linked = true,
            _ => {}
        }
        false
    }

    /// Y bounds of plot `i`: the default range while axes are linked,
    /// otherwise fitted to the plot's own data.
    fn y_bounds(&self, i: usize) -> [f64; 2] {
        let (lo, hi) = self.view.default_y_range();
        if self.axes_linked {
            return [lo, hi];
        }
        let (min, max) = self.view.chart().bounds(i);
        let (min, max) = (min as f64, max as f64);
        let pad = ((max - min) * 0.05).max(1.0);
        [min - pad, max + pad]
    }
}

/// Run a view over a report source until the user quits. The view starts
/// paused: space starts and stops polling, escape links or unlinks the plot
/// axes, `r` resets the zoom, `q` quits.
pub fn engage_monitor(
    view: Box<dyn View>,
    source: Box<dyn ReportSource>,
    device: &str,
) -> Result<(), QuadrantGuiError> {
    let app = App::new(view, source, device);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(&app.title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = app.view.refresh_period();
    let res = run_app(&mut terminal, app, tick_rate);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(QuadrantGuiError::from)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui(f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key.code) {
                    app.source.stop();
                    return Ok(());
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(f.size());

    let status = format!(
        " {} | {} | axes {} | <Space> start/stop <Esc> link axes <R> reset zoom <Q> quit",
        app.title,
        if app.running { "running" } else { "stopped" },
        if app.axes_linked { "linked" } else { "free" },
    );
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::Magenta)),
        outer[0],
    );

    let has_side_panel = !app.view.readouts().is_empty() || app.view.sample_rate_label().is_some();
    let (plot_area, side_area) = if has_side_panel {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(outer[1]);
        (cols[0], Some(cols[1]))
    } else {
        (outer[1], None)
    };

    draw_plots(f, app, plot_area);
    if let Some(area) = side_area {
        draw_side_panel(f, app, area);
    }
}

fn draw_plots(f: &mut Frame, app: &App, area: Rect) {
    let chart = app.view.chart();
    let n = chart.channels() as u32;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..n).map(|_| Constraint::Ratio(1, n)).collect::<Vec<_>>())
        .split(area);

    let x_max = chart.width() as f64;
    for (i, row) in rows.iter().enumerate() {
        let points = chart.points(i);
        let [lo, hi] = app.y_bounds(i);
        let plot = Chart::new(vec![Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points)])
        .block(
            Block::default()
                .title(Span::styled(
                    app.view.chart_label(i),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([lo, hi])
                .labels(vec![
                    Span::from(format!("{:.0}", lo)),
                    Span::from(format!("{:.0}", hi)),
                ]),
        );
        f.render_widget(plot, *row);
    }
}

fn draw_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let readouts = app.view.readouts();
    let mut constraints: Vec<Constraint> = readouts.iter().map(|_| Constraint::Min(5)).collect();
    if app.view.sample_rate_label().is_some() {
        constraints.push(Constraint::Length(4));
    }
    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (readout, panel) in readouts.iter().zip(panels.iter()) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(*panel);
        f.render_widget(block, *panel);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);
        f.render_widget(
            Paragraph::new(readout.label())
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD)),
            parts[0],
        );
        f.render_widget(
            GaugeWidget::new(readout.gauge())
                .marker_style(Style::default().fg(Color::Red))
                .center_style(Style::default().fg(Color::DarkGray)),
            parts[1],
        );
    }

    if let Some(label) = app.view.sample_rate_label() {
        if let Some(panel) = panels.last() {
            f.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(Style::default().add_modifier(Modifier::BOLD))
                    .block(Block::default().borders(Borders::ALL)),
                *panel,
            );
        }
    }
}
