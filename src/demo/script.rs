//! Headless mode: click choices by identifier and report what happened
//!
//! Renders into an off-screen buffer, clicks each requested item at the
//! position its last render recorded, and collects the callback events.
//! Useful for checking config (labels, classes) without a terminal.

use super::app::{build_select, label_of, ChangeQueue};
use anyhow::{Context, Result};
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{buffer::Buffer, layout::Rect};
use selectkit::config::Config;
use selectkit::{ChoiceId, Component};
use std::rc::Rc;

/// Width of the off-screen buffer
const SCRIPT_WIDTH: u16 = 40;

/// Outcome of a headless run
#[derive(Debug)]
pub struct ScriptReport {
    /// Identifiers passed to `on_choice_change` with their labels, in call order
    pub changes: Vec<(ChoiceId, String)>,
    pub active: Option<ChoiceId>,
    pub revision: u64,
    /// Final rendering, one string per row, trailing spaces trimmed
    pub lines: Vec<String>,
}

pub fn execute(config: &Config, ids: &[String]) -> Result<ScriptReport> {
    let queue = ChangeQueue::default();
    let select = build_select(&config.demo, Rc::clone(&queue))?;
    let sheet = config.style_sheet();

    let area = Rect::new(0, 0, SCRIPT_WIDTH, select.height());
    let mut buf = Buffer::empty(area);
    select.draw(area, &mut buf, &sheet)?;

    let mut changes = Vec::new();
    for id in ids {
        let item = select
            .item(id)
            .with_context(|| format!("No choice with identifier '{id}'"))?;
        let target = item
            .last_area()
            .with_context(|| format!("Choice '{id}' was not rendered"))?;

        select.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.x,
            row: target.y,
            modifiers: KeyModifiers::NONE,
        })?;
        let fired: Vec<ChoiceId> = queue.borrow_mut().drain(..).collect();
        changes.extend(fired.into_iter().map(|id| {
            let label = label_of(&select, &id);
            (id, label)
        }));

        if select.needs_redraw() {
            buf.reset();
            select.draw(area, &mut buf, &sheet)?;
        }
    }

    let snapshot = select.snapshot();
    Ok(ScriptReport {
        changes,
        active: snapshot.active().cloned(),
        revision: snapshot.revision(),
        lines: buffer_lines(&buf),
    })
}

/// Run and print the report to stdout
pub fn run(config: &Config, ids: &[String]) -> Result<()> {
    let report = execute(config, ids)?;

    for (id, label) in &report.changes {
        println!("on_choice_change({id}) {label}");
    }
    for line in &report.lines {
        println!("{line}");
    }
    match &report.active {
        Some(id) => println!("active: {id} (revision {})", report.revision),
        None => println!("active: none"),
    }
    Ok(())
}

fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
