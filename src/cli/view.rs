//! Text rendering of the interactive session.

use console::{measure_text_width, style};

use crate::cli::display::section_header;
use crate::cli::session::{Field, MenuOption, Session};

const APP_TITLE: &str = "BCP";
const HELP: &str =
    "↑/k up • ↓/j down • space/x toggle • A all • tab next • esc back • enter run • q quit";

/// Render the whole screen for `session`.
pub fn render(session: &Session) -> String {
    let width = session.width();
    let mut sections = vec![boundary(APP_TITLE, width)];

    sections.push(render_list(
        "Choose your cluster",
        "Select cluster(s) below",
        session.cluster_options(),
        session.focus() == Field::Clusters,
        session.cursor(Field::Clusters),
    ));
    sections.push(render_list(
        "Choose your action",
        "This will determine the action",
        session.command_options(),
        session.focus() == Field::Commands,
        session.cursor(Field::Commands),
    ));
    sections.push(render_status(session));

    if !session.output().is_empty() {
        sections.push(format!("{}\n{}", section_header("Output"), session.output()));
    }

    sections.push(boundary(HELP, width));
    sections.join("\n\n")
}

fn render_list<T>(
    title: &str,
    description: &str,
    options: &[MenuOption<T>],
    focused: bool,
    cursor: usize,
) -> String {
    let title = if focused {
        style(title).magenta().bold().to_string()
    } else {
        style(title).bold().to_string()
    };
    let mut lines = vec![title, style(description).dim().to_string()];

    for (index, option) in options.iter().enumerate() {
        let pointer = if focused && index == cursor { ">" } else { " " };
        let mark = if option.selected { "[x]" } else { "[ ]" };
        let line = format!("{pointer} {mark} {}", option.label);
        lines.push(if option.selected {
            style(line).green().to_string()
        } else {
            line
        });
    }

    lines.join("\n")
}

fn render_status(session: &Session) -> String {
    let header = if session.is_running() {
        format!("{}  {}", section_header("Build"), style("running...").yellow())
    } else {
        section_header("Build")
    };

    let clusters: Vec<String> = session
        .selected_clusters()
        .iter()
        .map(ToString::to_string)
        .collect();
    let commands: Vec<&str> = session
        .command_options()
        .iter()
        .filter(|option| option.selected)
        .map(|option| option.label.as_str())
        .collect();

    format!(
        "{header}\nCluster(s):\n{}\n\nCommand(s):\n{}",
        clusters.join("\n"),
        commands.join("\n")
    )
}

/// Left-aligned `text` padded with `/` to `width` columns.
fn boundary(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(measure_text_width(text) + 1);
    let styled = if text == APP_TITLE {
        section_header(text)
    } else {
        style(text).dim().to_string()
    };
    if padding == 0 {
        return styled;
    }
    format!("{styled} {}", style("/".repeat(padding)).blue())
}
