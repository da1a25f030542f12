//! Startup banner built from package metadata.

use console::style;

use crate::console::Accent;

const LOGO: &str = r" _           _                             _
| |_  _   _ | |__    ___  ___   ___   ___ | | __
| __|| | | || '_ \  / _ \/ __| / _ \ / _ \| |/ /
| |_ | |_| || |_) ||  __/\__ \|  __/|  __/|   <
 \__| \__,_||_.__/  \___||___/ \___| \___||_|\_\";

/// Crates doing the heavy lifting, listed on the banner.
const DEPENDENCIES: &[&str] = &["tokio", "reqwest", "dialoguer", "indicatif", "clap", "tracing"];

/// Banner text lines, uncolored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub logo: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub dependencies: String,
}

impl Banner {
    pub fn from_package() -> Self {
        Self {
            logo: LOGO,
            version: env!("CARGO_PKG_VERSION"),
            author: env!("CARGO_PKG_AUTHORS"),
            dependencies: DEPENDENCIES.join(", "),
        }
    }

    /// Renders the banner with terminal colors.
    pub fn render(&self, accent: Accent) -> String {
        let logo = match accent {
            Accent::Primary => style(self.logo).cyan(),
            Accent::Searching => style(self.logo).magenta(),
        };

        format!(
            "{logo}\n\t{}\n\t{} {}\n\t{} {}\n",
            style(format!("Version: v{}", self.version)).blue().italic(),
            style("Author:").white().bold().italic(),
            style(self.author).white(),
            style("Dependencies:").yellow(),
            style(&self.dependencies).white(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_uses_package_metadata() {
        let banner = Banner::from_package();
        assert_eq!(banner.version, env!("CARGO_PKG_VERSION"));
        assert!(banner.dependencies.starts_with("tokio, reqwest"));

        let plain = console::strip_ansi_codes(&banner.render(Accent::Primary)).into_owned();
        assert!(plain.contains(&format!("Version: v{}", banner.version)));
        assert!(plain.contains("Author: Tubeseek Contributors"));
    }
}
