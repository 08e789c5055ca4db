use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use yoji_core::{Judgement, Player, RadarChart, SeriesColor, Slot, Verdict, Winner};

use crate::app::{AppState, PICKERS};

const TITLE: &str = "🀄 架空四字熟語バトル";
const CAPTION: &str = "2つの言葉を合体させて、最強の「四字熟語」を作れ！ AIが5つの観点から理論的に採点します。";
const HELP: &str = "←/→ 選択欄の移動  ↑/↓ 言葉の変更  Enter 採点開始  r 素材を配り直す  q 終了";

/// Chart bounds leave room for the axis labels outside the unit circle.
const CHART_BOUND: f64 = 1.45;

pub fn draw(f: &mut Frame<'_>, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Min(12),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], state);
    draw_hand(f, chunks[1], state);
    draw_players(f, chunks[2], state);
    draw_result(f, chunks[3], state);
    f.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

fn draw_header(f: &mut Frame<'_>, area: Rect, state: &AppState) {
    let title = Line::from(vec![
        Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  [judge: {}]", state.provider),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let p = Paragraph::new(vec![title, Line::from(CAPTION)]);
    f.render_widget(p, area);
}

fn draw_hand(f: &mut Frame<'_>, area: Rect, state: &AppState) {
    let p = Paragraph::new(state.session.hand().join(" / "))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("今回の素材リスト"),
        );
    f.render_widget(p, area);
}

fn draw_players(f: &mut Frame<'_>, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (player, col) in Player::ALL.into_iter().zip(cols.iter()) {
        let picker = |slot: Slot, label: &'static str| {
            let focused = PICKERS[state.focus] == (player, slot);
            let style = if focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!("{}: ", label)),
                Span::styled(format!("〈{}〉", state.session.word(player, slot)), style),
            ])
        };
        let lines = vec![
            picker(Slot::Front, "前の言葉"),
            picker(Slot::Back, "後の言葉"),
            Line::from(vec![
                Span::raw("完成: "),
                Span::styled(
                    state.session.candidate(player),
                    Style::default()
                        .fg(player_color(player))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(player.display_name()),
        );
        f.render_widget(p, *col);
    }
}

fn draw_result(f: &mut Frame<'_>, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).title("AI審査員の分析レポート");

    if let Some(notice) = &state.pending {
        let p = Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    match &state.verdict {
        None => {
            let p = Paragraph::new("Enter で採点開始！（AI判定）")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(p, area);
        }
        Some(Verdict::Duplicate { word }) => {
            let p = Paragraph::new(duplicate_lines(word))
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: false })
                .block(block);
            f.render_widget(p, area);
        }
        Some(Verdict::Failed { message }) => {
            let p = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false })
                .block(block);
            f.render_widget(p, area);
        }
        Some(Verdict::Scored(judgement)) => draw_judgement(f, area, block, judgement),
    }
}

pub fn duplicate_lines(word: &str) -> Vec<Line<'static>> {
    vec![
        Line::from("⚠️ カブりました！"),
        Line::from(format!("二人とも「{}」を選びました。", word)),
        Line::from("違う組み合わせを作って再挑戦してください。"),
    ]
}

fn draw_judgement(f: &mut Frame<'_>, area: Rect, block: Block<'_>, j: &Judgement) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    let chart = &j.chart;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-CHART_BOUND, CHART_BOUND])
        .y_bounds([-CHART_BOUND, CHART_BOUND])
        .paint(|ctx| {
            let ends = RadarChart::axis_ends(1.0);
            for (i, &(x, y)) in ends.iter().enumerate() {
                ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, Color::DarkGray));
                let (nx, ny) = ends[(i + 1) % ends.len()];
                ctx.draw(&CanvasLine::new(x, y, nx, ny, Color::DarkGray));
            }
            for series in &chart.series {
                let color = color_of(series.color);
                let points = RadarChart::vertices(series, 1.0);
                for pair in points.windows(2) {
                    let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
                }
            }
            ctx.layer();
            for (label, (x, y)) in chart.axes().iter().zip(RadarChart::axis_ends(1.15)) {
                ctx.print(x - 0.2, y, *label);
            }
        });
    f.render_widget(canvas, cols[0]);

    let p = Paragraph::new(report_lines(j)).wrap(Wrap { trim: false });
    f.render_widget(p, cols[1]);
}

pub fn report_lines(j: &Judgement) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        "解析完了",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    for player in Player::ALL {
        let i = player.index();
        let mut text = format!(
            "{}「{}」: {}点 {:?}",
            player.display_name(),
            j.words[i],
            j.overall[i],
            j.scores[i].values()
        );
        if !j.parsed[i] {
            text.push_str(" (採点を読み取れず標準値)");
        }
        lines.push(Line::styled(text, Style::default().fg(player_color(player))));
    }
    let winner = match j.winner {
        Winner::A => format!("勝者: プレイヤーA「{}」", j.words[0]),
        Winner::B => format!("勝者: プレイヤーB「{}」", j.words[1]),
        Winner::Draw => "引き分け".to_string(),
    };
    lines.push(Line::styled(
        winner,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(""));
    lines.extend(j.commentary.lines().map(|l| Line::from(l.to_string())));
    lines
}

fn color_of(color: SeriesColor) -> Color {
    match color {
        SeriesColor::Red => Color::Red,
        SeriesColor::Blue => Color::Cyan,
    }
}

fn player_color(player: Player) -> Color {
    color_of(SeriesColor::for_player(player))
}
