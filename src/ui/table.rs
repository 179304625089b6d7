//! Rendering of profile tables, banners and the screen reset.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use prettytable::{format, row, Table};

use crate::storage::store::ProfileMap;

/// Shown instead of any stored password, whatever its length.
pub const SECRET_MASK: &str = "****";
const NO_SECRET: &str = "-";

pub fn profiles_table(profiles: &ProfileMap) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row![b->"Profile Name", b->"User", b->"IP Address", b->"Port", b->"Password"]);
    for (name, profile) in profiles {
        let secret = if profile.secret.is_some() { SECRET_MASK } else { NO_SECRET };
        table.add_row(row![name, profile.user, profile.host, profile.port, secret]);
    }
    table
}

pub fn render_profiles<W: Write>(out: &mut W, profiles: &ProfileMap) -> io::Result<()> {
    if profiles.is_empty() {
        return writeln!(out, "No saved connections yet.");
    }
    profiles_table(profiles).print(out)?;
    Ok(())
}

/// A boxed, bold red title line.
pub fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let width = title.chars().count() + 2;
    let bar = "─".repeat(width);
    writeln!(out, "{}", format!("╭{bar}╮").red().bold())?;
    writeln!(out, "{}", format!("│ {title} │").red().bold())?;
    writeln!(out, "{}", format!("╰{bar}╯").red().bold())
}

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    crossterm::queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::profile::Profile;

    fn render(profiles: &ProfileMap) -> String {
        let mut out = Vec::new();
        render_profiles(&mut out, profiles).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn secrets_are_masked_with_a_constant_width() {
        let mut profiles = ProfileMap::new();
        profiles.insert("short".into(), Profile::new("a", "h1", 22, Some("x".into())));
        profiles.insert(
            "long".into(),
            Profile::new("b", "h2", 22, Some("correct horse battery staple".into())),
        );
        let text = render(&profiles);
        assert!(!text.contains("correct horse"));
        assert_eq!(text.matches(SECRET_MASK).count(), 2);
        assert!(!text.contains("*****"));
    }

    #[test]
    fn empty_store_says_so() {
        assert_eq!(render(&ProfileMap::new()), "No saved connections yet.\n");
    }

    #[test]
    fn banner_contains_title() {
        let mut out = Vec::new();
        banner(&mut out, "Delete a Connection").unwrap();
        assert!(String::from_utf8(out).unwrap().contains("│ Delete a Connection │"));
    }
}
