use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use rink_heatmap::bin_stats::{format_pct, format_xg};
use rink_heatmap::config::AppConfig;
use rink_heatmap::filter::{HIGH_DANGER_XG, HIGH_QUALITY_XG};
use rink_heatmap::feed;
use rink_heatmap::render::{Rgb, Scene};
use rink_heatmap::shot::period_label;
use rink_heatmap::shots_fetch::ShotDataClient;
use rink_heatmap::state::{self, AppState, DataSource, LoadStatus, ProviderCommand, apply_delta};
use rink_heatmap::tooltip::{Tooltip, TooltipEvent, TooltipPayload};

const XG_STEP: f64 = 0.05;
const RADIUS_STEP: f64 = 1.0;
const TOOLTIP_COLS: u16 = 34;
const TOOLTIP_ROWS: u16 = 12;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    csv_path: Option<PathBuf>,
    screen: Rect,
}

impl App {
    fn new(
        state: AppState,
        cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
        csv_path: Option<PathBuf>,
    ) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
            csv_path,
            screen: Rect::default(),
        }
    }

    fn send(&mut self, cmd: Option<ProviderCommand>) {
        let Some(cmd) = cmd else {
            return;
        };
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Shot loading unavailable");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Shot request failed");
        }
    }

    fn update_filter(&mut self, edit: impl FnOnce(&mut rink_heatmap::filter::FilterState)) {
        let mut next = self.state.filter.clone();
        edit(&mut next);
        let cmd = self.state.set_filter(next);
        self.send(cmd);
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else {
                    self.state.tooltip_event(TooltipEvent::Close);
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.state.move_team_cursor(false),
            KeyCode::Right | KeyCode::Char('l') => self.state.move_team_cursor(true),
            KeyCode::Char(' ') | KeyCode::Char('t') => {
                if let Some(team) = self.state.cursor_team().map(str::to_string) {
                    self.update_filter(|f| f.toggle_team(&team));
                }
            }
            KeyCode::Char('a') => self.update_filter(|f| f.teams.clear()),
            KeyCode::Char('z') => self.update_filter(|f| f.clear_selection()),
            KeyCode::Char('u') => self.update_filter(|f| f.set_xg_floor(HIGH_QUALITY_XG)),
            KeyCode::Char('d') => self.update_filter(|f| f.set_xg_floor(HIGH_DANGER_XG)),
            KeyCode::Char(c @ '1'..='4') => {
                let period = c as u8 - b'0';
                self.update_filter(|f| f.toggle_period(period));
            }
            KeyCode::Char('[') => self.update_filter(|f| {
                let (min, max) = xg_bounds(f);
                f.set_xg_range(min - XG_STEP, max);
            }),
            KeyCode::Char(']') => self.update_filter(|f| {
                let (min, max) = xg_bounds(f);
                f.set_xg_range(min + XG_STEP, max);
            }),
            KeyCode::Char('{') => self.update_filter(|f| {
                let (min, max) = xg_bounds(f);
                f.set_xg_range(min, max - XG_STEP);
            }),
            KeyCode::Char('}') => self.update_filter(|f| {
                let (min, max) = xg_bounds(f);
                f.set_xg_range(min, max + XG_STEP);
            }),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.update_filter(|f| f.set_hex_radius(f.hex_radius + RADIUS_STEP))
            }
            KeyCode::Char('-') => {
                self.update_filter(|f| f.set_hex_radius(f.hex_radius - RADIUS_STEP))
            }
            KeyCode::Char('x') => self.update_filter(|f| f.show_hexagons = !f.show_hexagons),
            KeyCode::Char('m') => {
                self.update_filter(|f| f.show_individual_shots = !f.show_individual_shots)
            }
            KeyCode::Char('g') => self.update_filter(|f| f.cycle_shot_result()),
            KeyCode::Char('s') => self.update_filter(|f| f.cycle_situation()),
            KeyCode::Tab | KeyCode::Char('j') => self.state.select_next_bin(true),
            KeyCode::BackTab | KeyCode::Char('k') => self.state.select_next_bin(false),
            KeyCode::Enter => self.state.toggle_pin_selected(),
            KeyCode::Char('r') => {
                let cmd = self.state.request_reload();
                self.send(cmd);
            }
            KeyCode::Char('o') => {
                let cmd = self.state.switch_source(DataSource::Sample);
                self.send(cmd);
            }
            KeyCode::Char('c') => match self.csv_path.clone() {
                Some(path) => {
                    let cmd = self.state.switch_source(DataSource::Csv(path));
                    self.send(cmd);
                }
                None => self
                    .state
                    .push_log("[INFO] No CSV path given (start with --csv=PATH)"),
            },
            KeyCode::Char('v') => {
                if self.state.config.api.is_some() {
                    let cmd = self.state.switch_source(DataSource::Live);
                    self.send(cmd);
                    self.send(Some(ProviderCommand::FetchTeams));
                } else {
                    self.state
                        .push_log("[INFO] Live source not configured (set SHOTS_API_URL)");
                }
            }
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let inner = canvas_inner(self.screen);
        let Some((px, py)) = cell_to_canvas(&self.state, inner, mouse.column, mouse.row) else {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                self.state.tooltip_event(TooltipEvent::ClickOutside);
            }
            return;
        };
        match mouse.kind {
            MouseEventKind::Moved => self.state.hover(px, py),
            MouseEventKind::Down(MouseButton::Left) => self.state.click(px, py),
            _ => {}
        }
    }
}

fn xg_bounds(f: &rink_heatmap::filter::FilterState) -> (f64, f64) {
    (f.xg_min.unwrap_or(0.0), f.xg_max.unwrap_or(1.0))
}

fn parse_args() -> (Option<PathBuf>, bool) {
    let mut csv = None;
    let mut sample = false;
    for arg in std::env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--csv=") {
            csv = Some(PathBuf::from(path));
        } else if arg == "--sample" {
            sample = true;
        }
    }
    (csv, sample)
}

fn main() -> io::Result<()> {
    let config = AppConfig::load();
    let (csv_path, force_sample) = parse_args();

    let mut state = AppState::new(config.clone());
    let client = match config.api.as_ref().map(ShotDataClient::new) {
        Some(Ok(client)) => Some(client),
        Some(Err(err)) => {
            state.push_log(format!("[WARN] Live client setup failed: {err:#}"));
            None
        }
        None => None,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let live = client.is_some();
    feed::spawn_provider(tx, cmd_rx, client);

    let mut app = App::new(state, Some(cmd_tx), csv_path.clone());
    let first = match (csv_path, force_sample, live) {
        (Some(path), false, _) => app.state.switch_source(DataSource::Csv(path)),
        (_, false, true) => {
            app.send(Some(ProviderCommand::FetchTeams));
            app.state.push_log("[INFO] Select a team to load live shots");
            app.state.switch_source(DataSource::Live)
        }
        _ => app.state.switch_source(DataSource::Sample),
    };
    app.send(first);

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.screen = terminal.size()?;
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

struct Areas {
    header: Rect,
    canvas: Rect,
    side: Rect,
    footer: Rect,
}

fn areas(size: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);
    Areas {
        header: rows[0],
        canvas: body[0],
        side: body[1],
        footer: rows[2],
    }
}

fn canvas_block() -> Block<'static> {
    Block::default().title("Shot density").borders(Borders::ALL)
}

fn canvas_inner(size: Rect) -> Rect {
    canvas_block().inner(areas(size).canvas)
}

fn cell_to_canvas(state: &AppState, inner: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    if inner.width == 0
        || inner.height == 0
        || column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }
    let fx = (column - inner.x) as f64 + 0.5;
    let fy = (row - inner.y) as f64 + 0.5;
    Some((
        fx / inner.width as f64 * state.config.canvas_width,
        fy / inner.height as f64 * state.config.canvas_height,
    ))
}

fn canvas_to_cell(state: &AppState, inner: Rect, px: f64, py: f64) -> (u16, u16) {
    let col = (px / state.config.canvas_width * inner.width as f64).max(0.0) as u16;
    let row = (py / state.config.canvas_height * inner.height as f64).max(0.0) as u16;
    (inner.x + col, inner.y + row)
}

fn ui(frame: &mut Frame, app: &App) {
    let size = frame.size();
    let a = areas(size);

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, a.header);

    render_canvas(frame, a.canvas, &app.state);
    render_side(frame, a.side, &app.state);

    let footer = Paragraph::new(footer_text()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, a.footer);

    if let Some(tip) = app.state.tooltip.visible() {
        render_tooltip(frame, canvas_block().inner(a.canvas), &app.state, tip);
    }

    if app.state.help_overlay {
        render_help_overlay(frame, size);
    }
}

fn header_text(state: &AppState) -> String {
    let s = &state.view.summary;
    let status = match &state.status {
        LoadStatus::Idle => "IDLE".to_string(),
        LoadStatus::Loading => "LOADING".to_string(),
        LoadStatus::Ready => match &state.loaded_at {
            Some(at) => format!("READY {at}"),
            None => "READY".to_string(),
        },
        LoadStatus::Failed(_) => "ERROR".to_string(),
    };
    let line1 = format!(
        "  RINK HEATMAP | {} | {status}",
        state.source.label().to_uppercase()
    );
    let line2 = format!(
        "  Total Shots: {} | Total xG: {:.2} | Avg xG/Shot: {}",
        s.total_shots,
        s.total_xg,
        format_xg(s.avg_xg)
    );
    format!("{line1}\n{line2}")
}

fn footer_text() -> String {
    "←/→ Team | Space Toggle | 1-4 Period | [ ] { } xG | z Reset | +/- Radius | Tab Bin | Enter Pin | r Retry | ? Help | q Quit".to_string()
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

fn render_canvas(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = canvas_block();
    let inner = block.inner(area);
    match &state.status {
        LoadStatus::Loading if state.shots.is_empty() => {
            let msg = Paragraph::new("Loading shots...")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(msg, area);
            return;
        }
        LoadStatus::Failed(message) => {
            let msg = Paragraph::new(format!("Error loading shot data\n{message}\n\nPress r to retry"))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }
        _ => {}
    }

    let scene = Scene::build(
        &state.view,
        &state.filter,
        &state.projector,
        state.config.high_value_xg,
    );
    let width = scene.width;
    let height = scene.height;
    let selected = state.selected_bin;
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| paint_scene(ctx, &scene, selected));
    frame.render_widget(canvas, area);

    if state.view.shots.is_empty() && state.status == LoadStatus::Ready && inner.height > 0 {
        let hint = if state.source == DataSource::Live && state.filter.teams.is_empty() {
            "Select a team to load shots"
        } else {
            "No shots match the current filters"
        };
        let line = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), line);
    }
}

fn paint_scene(ctx: &mut Context, scene: &Scene, selected: Option<usize>) {
    let h = scene.height;
    // Canvas y grows upward; scene y grows downward.
    let flip = |y: f64| h - y;
    let board = Color::Gray;
    let rink = &scene.rink;
    let o = rink.outline;

    ctx.draw(&Rectangle {
        x: o.left,
        y: flip(o.top + o.height),
        width: o.width,
        height: o.height,
        color: board,
    });
    ctx.draw(&CanvasLine {
        x1: rink.center_line_x,
        y1: flip(o.top),
        x2: rink.center_line_x,
        y2: flip(o.top + o.height),
        color: Color::Red,
    });
    for gx in rink.goal_lines_x {
        ctx.draw(&CanvasLine {
            x1: gx,
            y1: flip(o.top),
            x2: gx,
            y2: flip(o.top + o.height),
            color: Color::Blue,
        });
    }
    for (cx, cy) in &rink.faceoff_circles {
        ctx.draw(&Circle {
            x: *cx,
            y: flip(*cy),
            radius: rink.faceoff_radius,
            color: board,
        });
    }
    for (gx, gy, gw, gh) in rink.goals {
        ctx.draw(&Rectangle {
            x: gx,
            y: flip(gy + gh),
            width: gw,
            height: gh,
            color: Color::Red,
        });
    }
    ctx.layer();

    for hex in &scene.hexagons {
        let color = if selected == Some(hex.bin_index) {
            Color::White
        } else {
            rgb(hex.fill)
        };
        for i in 0..6 {
            let (ax, ay) = hex.corners[i];
            let (bx, by) = hex.corners[(i + 1) % 6];
            ctx.draw(&CanvasLine {
                x1: hex.center.0 + ax,
                y1: flip(hex.center.1 + ay),
                x2: hex.center.0 + bx,
                y2: flip(hex.center.1 + by),
                color,
            });
        }
    }
    ctx.layer();

    for marker in &scene.markers {
        ctx.draw(&Circle {
            x: marker.center.0,
            y: flip(marker.center.1),
            radius: marker.radius,
            color: rgb(marker.fill),
        });
    }
}

fn render_side(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11),
            Constraint::Min(4),
            Constraint::Length(5),
        ])
        .split(area);

    let filters = Paragraph::new(filter_text(state))
        .block(Block::default().title("Filters").borders(Borders::ALL));
    frame.render_widget(filters, chunks[0]);

    let detail = Paragraph::new(selected_bin_text(state))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Selected bin").borders(Borders::ALL));
    frame.render_widget(detail, chunks[1]);

    let console = Paragraph::new(console_text(state))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Log").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);
}

fn filter_text(state: &AppState) -> String {
    let f = &state.filter;
    let cursor = state.cursor_team().unwrap_or("-");
    let teams = if f.teams.is_empty() {
        "all".to_string()
    } else {
        f.teams.join(", ")
    };
    let periods = if f.periods.is_empty() {
        "all".to_string()
    } else {
        f.periods
            .iter()
            .map(|p| period_label(*p))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let (min, max) = xg_bounds(f);
    let on_off = |b: bool| if b { "on" } else { "off" };
    [
        format!("Team cursor: {cursor}"),
        format!("Teams: {teams}"),
        format!("Periods: {periods}"),
        format!("xG: {min:.2} - {max:.2}"),
        format!(
            "Result: {}",
            f.shot_result.map(|r| r.label()).unwrap_or("All")
        ),
        format!(
            "Situation: {}",
            f.situation.map(|s| s.label()).unwrap_or("All")
        ),
        format!("Hex radius: {:.0}px", f.hex_radius),
        format!(
            "Hexagons: {} | Shots: {}",
            on_off(f.show_hexagons),
            on_off(f.show_individual_shots)
        ),
        format!(
            "Bins: {} | Loaded: {}/{}",
            state.view.bins.len(),
            state.shots.len(),
            state.total_count
        ),
    ]
    .join("\n")
}

fn selected_bin_text(state: &AppState) -> String {
    let Some(stats) = state.selected_bin.and_then(|i| state.view.stats.get(i)) else {
        return "Tab to step through bins".to_string();
    };
    hexagon_lines(stats).join("\n")
}

fn hexagon_lines(s: &rink_heatmap::bin_stats::BinStats) -> Vec<String> {
    vec![
        format!("Shots: {}", s.count),
        format!("Avg xG: {}", format_xg(s.avg_xg)),
        format!("Goals: {} ({})", s.goals, format_pct(s.conversion_rate)),
        format!("On goal: {} ({})", s.on_goal_count, format_pct(s.on_goal_rate)),
        format!("Avg distance: {:.1} ft", s.avg_distance),
        format!("Avg angle: {:.1}°", s.avg_angle),
        format!("Types: {}", s.shot_types_label()),
        format!(
            "PP {} | PK {} | EV {} | EN {}",
            s.power_play, s.penalty_kill, s.even_strength, s.empty_net
        ),
        format!(
            "Top shooter: {} ({})",
            s.top_shooter_label(),
            s.top_shooter_count
        ),
    ]
}

fn shot_lines(shot: &rink_heatmap::shot::NormalizedShot) -> Vec<String> {
    let e = &shot.shot;
    let result = if e.goal.unwrap_or(false) {
        "Goal"
    } else if e.on_goal {
        "On goal"
    } else if e.is_blocked() {
        "Blocked"
    } else {
        "Missed"
    };
    vec![
        format!("Shooter: {}", if e.shooter.is_empty() { "N/A" } else { e.shooter.as_str() }),
        format!("Team: {}", e.team),
        format!("Period: {}", period_label(e.period)),
        format!("Type: {}", e.shot_type),
        format!("xG: {}", format_xg(e.xg)),
        format!("Distance: {:.1} ft", e.distance),
        format!("Result: {result}"),
    ]
}

fn render_tooltip(frame: &mut Frame, inner: Rect, state: &AppState, tip: &Tooltip) {
    let (title, lines) = match &tip.payload {
        TooltipPayload::Hexagon(stats) => ("Bin", hexagon_lines(stats)),
        TooltipPayload::Shot(shot) => ("Shot", shot_lines(shot)),
    };
    let title = if state.tooltip.is_pinned() {
        format!("{title} (pinned, Esc to close)")
    } else {
        title.to_string()
    };
    let (col, row) = canvas_to_cell(state, inner, tip.x, tip.y);
    let screen = frame.size();
    let width = TOOLTIP_COLS.min(screen.width);
    let height = TOOLTIP_ROWS.min(screen.height);
    let x = col.min(screen.width.saturating_sub(width));
    let y = row.min(screen.height.saturating_sub(height));
    let rect = Rect::new(x, y, width, height);

    frame.render_widget(Clear, rect);
    let popup = Paragraph::new(lines.join("\n"))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(popup, rect);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Rink Heatmap - Help",
        "",
        "Filters:",
        "  ←/→ or h/l   Move team cursor",
        "  Space / t    Toggle team under cursor",
        "  a            Clear team selection",
        "  1-4          Toggle period (4 = OT)",
        "  [ / ]        Lower / raise min xG",
        "  { / }        Lower / raise max xG",
        "  u            High quality only (xG ≥ 0.8)",
        "  d            High danger area (xG ≥ 0.15)",
        "  z            Reset teams, periods and xG range",
        "  g            Cycle shot result",
        "  s            Cycle situation",
        "",
        "Map:",
        "  + / -        Hex radius",
        "  x / m        Toggle hexagons / shot markers",
        "  Tab / j / k  Step through bins",
        "  Enter        Pin tooltip for selected bin",
        "  Esc          Close tooltip",
        "  mouse        Hover for details, click to pin",
        "",
        "Data:",
        "  v / c / o    Live / CSV / sample source",
        "  r            Reload",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
