use std::io;
use std::process::{Command, Stdio};
use std::thread;

/// Something that can open a URL, typically a browser.
pub trait UrlOpener {
    fn open(&mut self, url: &str) -> io::Result<()>;
}

/// Opens URLs with the platform's default handler. The call returns once the
/// handler is spawned; a background thread reaps it when it exits.
#[derive(Debug, Default)]
pub struct SystemBrowser {
    program: Option<String>,
}

impl SystemBrowser {
    /// Uses `program <url>` instead of the platform handler.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: Some(program.to_owned()),
        }
    }

    fn command(&self, url: &str) -> Command {
        let mut cmd = if let Some(program) = &self.program {
            Command::new(program)
        } else if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            // `cmd /C start` would split the URL at '&'.
            let mut cmd = Command::new("rundll32");
            cmd.arg("url.dll,FileProtocolHandler");
            cmd
        } else {
            Command::new("xdg-open")
        };
        cmd.arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl UrlOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> io::Result<()> {
        let mut child = self.command(url).spawn()?;
        thread::Builder::new()
            .name("map-opener-reaper".into())
            .spawn(move || match child.wait() {
                Ok(status) if !status.success() => {
                    tracing::warn!(%status, "map opener exited with failure")
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(%err, "failed to wait on map opener"),
            })?;
        Ok(())
    }
}

/// An embeddable frame for a notebook-style display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineFrame {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl InlineFrame {
    pub const WIDTH: u32 = 900;
    pub const HEIGHT: u32 = 600;

    pub fn new(src: String) -> Self {
        Self {
            src,
            width: Self::WIDTH,
            height: Self::HEIGHT,
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<iframe width="{}" height="{}" src="{}" frameborder="0" allowfullscreen></iframe>"#,
            self.width,
            self.height,
            self.src.replace('&', "&amp;").replace('"', "&quot;"),
        )
    }
}

/// Display capability of the host environment. Only present in interactive
/// notebook-style hosts.
pub trait DisplaySink {
    fn display(&mut self, frame: &InlineFrame) -> io::Result<()>;
}
