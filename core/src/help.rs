//! Help text rendering.
//!
//! Output is a sequence of titled sections (`NAME`, `USAGE`, `VERSION`,
//! `DESCRIPTION`, `COMMANDS`, `OPTIONS`, `GLOBALS`); empty sections are left
//! out. Rows inside a section are padded to the widest first column.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::command::Command;
use crate::flags::Flags;

const TAB: &str = "  ";

/// Renders help for the last command of `path`.
///
/// `path` runs from the root to the command being described; its names make
/// up the usage line.
pub fn render(path: &[&Command], globals: &Flags, version: Option<&str>) -> String {
    let Some(command) = path.last() else {
        return String::new();
    };
    let mut out = String::new();

    if !command.name.is_empty() {
        out.push_str("NAME:\n");
        out.push_str(TAB);
        out.push_str(&command.name);
        if !command.help.is_empty() {
            out.push_str(" - ");
            out.push_str(&command.help);
        }
        out.push_str("\n\n");
    }

    out.push_str("USAGE:\n");
    out.push_str(TAB);
    let names: Vec<&str> = path
        .iter()
        .map(|c| c.name.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    if !names.is_empty() {
        out.push_str(&names.join(" "));
        out.push(' ');
    }
    if command.is_leaf() {
        out.push_str("[options] [arguments...]");
    } else {
        out.push_str("[options] command [command options] [arguments...]");
    }
    out.push_str("\n\n");

    if let Some(version) = version.filter(|v| !v.is_empty()) {
        out.push_str("VERSION:\n");
        out.push_str(TAB);
        out.push_str(version);
        out.push_str("\n\n");
    }

    if !command.description.is_empty() {
        out.push_str("DESCRIPTION:\n");
        for line in command.description.trim().split('\n') {
            out.push_str(TAB);
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    if !command.commands.is_empty() {
        out.push_str("COMMANDS:\n");
        write_commands(&mut out, &command.commands);
        out.push('\n');
    }

    if !command.flags.is_empty() {
        out.push_str("OPTIONS:\n");
        write_flags(&mut out, &command.flags);
        out.push('\n');
    }

    if !globals.is_empty() {
        out.push_str("GLOBALS:\n");
        write_flags(&mut out, globals);
        out.push('\n');
    }

    out.trim().to_string()
}

fn write_commands(out: &mut String, commands: &[Command]) {
    let width = commands
        .iter()
        .map(|c| c.name.width())
        .max()
        .unwrap_or_default();

    for command in commands {
        let _ = writeln!(
            out,
            "{TAB}{}- {}",
            pad_right(&command.name, width),
            command.help
        );
    }
}

fn write_flags(out: &mut String, flags: &Flags) {
    let rows: Vec<[String; 3]> = flags
        .iter()
        .map(|flag| [flag.syntax(), flag.kind.to_string(), flag.help.clone()])
        .collect();

    let syntax_width = rows.iter().map(|r| r[0].width()).max().unwrap_or_default();
    let kind_width = rows.iter().map(|r| r[1].width()).max().unwrap_or_default();

    for [syntax, kind, help] in &rows {
        let _ = writeln!(
            out,
            "{TAB}{}{}- {}",
            pad_right(syntax, syntax_width),
            pad_left(kind, kind_width),
            help
        );
    }
}

/// Pads `s` on the right to one column past `width`.
fn pad_right(s: &str, width: usize) -> String {
    let fill = (width + 1).saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Pads `s` on the left to one column past `width`, plus a trailing space.
fn pad_left(s: &str, width: usize) -> String {
    let fill = (width + 1).saturating_sub(s.width());
    format!("{}{s} ", " ".repeat(fill))
}
