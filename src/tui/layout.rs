use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::{ColorConfig, Config};
use crate::domain::{format_money, format_optional_money, summarize, Item, ItemStatus};
use crate::editor::{DraftField, EditorState};
use crate::tui::app::TuiApp;

pub fn render(frame: &mut Frame, app: &mut TuiApp, config: &Config) {
    let colors = &config.colors;
    let currency = config.display.currency_symbol.as_str();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Summary cards
            Constraint::Min(8),    // Inventory + detail
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_summary(frame, app, chunks[0], colors, currency);
    render_inventory(frame, app, body[0], colors, currency);
    render_detail(frame, app, body[1], colors, currency);
    render_status_bar(frame, app, chunks[2], colors);

    if app.editor.is_open() {
        render_editor(frame, app, colors);
    }
}

fn render_summary(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig, currency: &str) {
    let summary = summarize(&app.items);
    let cards = [
        ("Total Cost", summary.total_cost, colors.cost),
        ("Potential Revenue", summary.potential_revenue, colors.revenue),
        ("Total Sales", summary.total_sales, colors.sales),
        ("Total Profit", summary.total_profit, colors.profit),
    ];

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, amount, color), card_area) in cards.into_iter().zip(areas.iter()) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border));
        let value = Paragraph::new(Span::styled(
            format_money(amount, currency),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(block);
        frame.render_widget(value, *card_area);
    }
}

fn render_inventory(
    frame: &mut Frame,
    app: &mut TuiApp,
    area: Rect,
    colors: &ColorConfig,
    currency: &str,
) {
    let items: Vec<ListItem> = app
        .items
        .iter()
        .map(|item| {
            let (marker, style) = match item.status {
                ItemStatus::InStock => ("●", Style::default().fg(colors.in_stock)),
                ItemStatus::Sold => ("✓", Style::default().fg(colors.sold)),
            };
            let price = format_optional_money(item.display_price(), currency);
            ListItem::new(format!("{} {}  {}", marker, item.name, price)).style(style)
        })
        .collect();

    let title = format!(
        " Inventory ({}) [{}/{}] ",
        app.items.len(),
        (app.item_index + 1).min(app.items.len().max(1)),
        app.items.len().max(1)
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    if items.is_empty() {
        let empty = Paragraph::new("No items yet. Press 'a' to add your first piece.")
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig, currency: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let Some(item) = app.selected_item() else {
        frame.render_widget(Paragraph::new("No item selected").block(block.title(" Details ")), area);
        return;
    };

    let text = Text::from(detail_lines(item, colors, currency, area.width));
    let paragraph = Paragraph::new(text)
        .block(block.title(format!(" {} ", item.name)))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn detail_lines<'a>(item: &'a Item, colors: &ColorConfig, currency: &str, width: u16) -> Vec<Line<'a>> {
    let status_color = if item.is_sold() { colors.sold } else { colors.in_stock };
    let mut lines = vec![
        Line::from(Span::styled(
            item.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            item.status.to_string(),
            Style::default().fg(status_color),
        )),
        Line::from(""),
        Line::from(format!("Cost:       {}", format_money(item.cost, currency))),
        Line::from(format!(
            "List price: {}",
            format_money(item.potential_revenue, currency)
        )),
    ];

    if let Some(sold_price) = item.sold_price {
        lines.push(Line::from(Span::styled(
            format!("Sold for:   {}", format_money(sold_price, currency)),
            Style::default().fg(colors.sold),
        )));
        lines.push(Line::from(format!(
            "Profit:     {}",
            format_money(sold_price - item.cost, currency)
        )));
    }

    lines.push(Line::from(format!(
        "Added:      {}",
        item.date_added.format("%Y-%m-%d")
    )));
    if !item.image_url.is_empty() {
        lines.push(Line::from(format!("Image:      {}", image_label(&item.image_url))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("─".repeat(width.saturating_sub(2) as usize)));
    if item.description.is_empty() {
        lines.push(Line::from(Span::styled(
            "No description",
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(item.description.lines().map(Line::from));
    }

    lines
}

fn image_label(image_url: &str) -> String {
    if image_url.starts_with("data:") {
        "embedded image".to_string()
    } else {
        image_url.to_string()
    }
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some((_, ref name)) = app.pending_delete {
        format!("Delete \"{}\"? This cannot be undone. (y/n)", name)
    } else if app.editor.is_delete_pending() {
        "Delete this item? This cannot be undone. (y/n)".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.editor.is_open() {
        "Tab:Next field  Enter:Save  Ctrl+g:Describe  Ctrl+d:Delete  Esc:Close".to_string()
    } else {
        "j/k:Nav  n/p:Page  Enter:Open  a:Add  d:Delete  e:Export  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn render_editor(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig) {
    let area = centered(frame.area(), 70, 80);
    let editor = &app.editor;

    let title = match editor.state() {
        EditorState::Creating => " Add New Item ".to_string(),
        EditorState::Editing { item } if item.is_sold() => format!(" {} (Sold) ", item.name),
        EditorState::Editing { item } => format!(" {} ", item.name),
        EditorState::Closed => String::new(),
    };

    let mut lines = Vec::new();
    for field in DraftField::ALL {
        if field == DraftField::SoldPrice && !matches!(editor.state(), EditorState::Editing { .. }) {
            continue;
        }
        if field == DraftField::SoldPrice {
            lines.push(Line::from(""));
            let heading = if editor.is_locked() { "Sale" } else { "Mark as Sold" };
            lines.push(Line::from(Span::styled(
                heading,
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
            )));
        }

        let focused = editor.focus() == field && editor.is_editable(field);
        let label_style = if focused {
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let value_style = if editor.is_editable(field) {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let mut value = editor.draft().field(field).to_string();
        if field == DraftField::ImageUrl && value.starts_with("data:") {
            value = "embedded image".to_string();
        }
        if focused {
            value.push('▏');
        }

        lines.push(Line::from(Span::styled(
            format!("{}{}", if focused { "> " } else { "  " }, field.label()),
            label_style,
        )));
        for row in value.split('\n') {
            lines.push(Line::from(Span::styled(format!("    {}", row), value_style)));
        }
    }

    if app.generating.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Generating description...",
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    area
}
