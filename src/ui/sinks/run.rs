use std::io::{self, Write};
use std::sync::Mutex;

use solidactions::domain::entities::RunStatus;
use solidactions::domain::ports::{RunEvent, RunEventSink};
use solidactions::domain::services::log_stream::LogPayload;

use crate::ui::context::UiContext;
use crate::ui::format::local_time;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Which command is observing the run; only the final message differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunView {
    /// `run --wait`
    Wait,
    /// `logs [--follow]`
    Logs,
}

/// Render log content. Raw text passes through unless blank; entries become
/// one `[time] [out] message` line each, skipping empty messages.
pub fn render_logs(payload: &LogPayload, color: bool) -> String {
    match payload {
        LogPayload::Raw(text) if text.trim().is_empty() => String::new(),
        LogPayload::Raw(text) => {
            let mut out = text.clone();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out
        }
        LogPayload::Entries(entries) => entries
            .iter()
            .filter(|entry| !entry.text().is_empty())
            .map(|entry| {
                let time = ColoredText::dim(format!("[{}]", local_time(entry.timestamp.as_deref())))
                    .render(color);
                if entry.is_stderr() {
                    format!(
                        "{} {} {}\n",
                        time,
                        ColoredText::error("[err]").render(color),
                        ColoredText::error(entry.text()).render(color)
                    )
                } else {
                    format!(
                        "{} {} {}\n",
                        time,
                        ColoredText::dim("[out]").render(color),
                        entry.text()
                    )
                }
            })
            .collect(),
    }
}

pub struct ConsoleRunSink {
    view: RunView,
    color: bool,
    unicode: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleRunSink {
    pub fn stdout(ui: &UiContext, view: RunView) -> Self {
        Self::with_writer(ui, view, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: &UiContext, view: RunView, writer: W) -> Self {
        Self {
            view,
            color: ui.color,
            unicode: ui.unicode,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn finished(&self, status: &RunStatus) -> String {
        let c = self.color;
        match (self.view, status) {
            (RunView::Logs, status) => format!(
                "\n{}\n",
                ColoredText::dim(format!("--- Run {} ---", status)).render(c)
            ),
            (RunView::Wait, RunStatus::Completed) => format!(
                "\n{} {}\n",
                Icon::Success.colored(c, self.unicode),
                ColoredText::success("Workflow completed successfully!").render(c)
            ),
            (RunView::Wait, RunStatus::Failed) => format!(
                "\n{} {}\n",
                Icon::Error.colored(c, self.unicode),
                ColoredText::error("Workflow failed!").render(c)
            ),
            (RunView::Wait, other) => format!(
                "\n{}\n",
                ColoredText::warning(format!("Workflow finished with status: {}", other))
                    .render(c)
            ),
        }
    }

    fn render(&self, event: RunEvent) -> String {
        let c = self.color;
        match event {
            RunEvent::Triggered { id } => format!(
                "{} {} {}\n",
                Icon::Success.colored(c, self.unicode),
                ColoredText::success("Workflow triggered! Run ID:").render(c),
                ColoredText::plain(id).bold().render(c)
            ),
            RunEvent::Waiting => ".".to_string(),
            RunEvent::Snapshot { status, logs } => format!(
                "{} {}\n{}\n{}",
                ColoredText::plain("Status:").bold().render(c),
                status,
                ColoredText::dim("---").render(c),
                render_logs(&logs, c)
            ),
            RunEvent::Following => format!(
                "\n{}\n\n",
                ColoredText::info("--- Following logs (Ctrl+C to stop) ---").render(c)
            ),
            RunEvent::Logs { payload } => render_logs(&payload, c),
            RunEvent::Finished { status } => self.finished(&status),
            RunEvent::TimedOut => "\n".to_string(),
        }
    }
}

impl RunEventSink for ConsoleRunSink {
    fn on_event(&self, event: RunEvent) {
        let text = self.render(event);
        if text.is_empty() {
            return;
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.write_all(text.as_bytes());
            let _ = writer.flush();
        }
    }
}
