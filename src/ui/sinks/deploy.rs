use std::io::{self, Write};
use std::sync::Mutex;

use solidactions::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Human-readable deploy progress
pub struct ConsoleDeploySink {
    color: bool,
    unicode: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleDeploySink {
    pub fn stdout(ui: &UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: &UiContext, writer: W) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.color, self.unicode)
    }

    fn warning_line(&self, text: impl Into<String>) -> String {
        format!(
            "{} {}\n",
            self.icon(Icon::Warning),
            ColoredText::warning(text).render(self.color)
        )
    }

    fn render(&self, event: DeployEvent) -> Option<String> {
        let c = self.color;
        let out = match event {
            DeployEvent::Started {
                project,
                tier,
                source,
            } => format!(
                "{} {}\n{}\n{}\n",
                self.icon(Icon::Deploy),
                ColoredText::info(format!(
                    "Deploying to project \"{}\"{}...",
                    project,
                    tier.label()
                ))
                .bold()
                .render(c),
                ColoredText::dim(format!("Source: {}", source.display())).render(c),
                ColoredText::dim("Validating project structure...").render(c),
            ),

            DeployEvent::Validated { warnings } => {
                let mut out: String = warnings.iter().map(|w| self.warning_line(w)).collect();
                out.push_str(&format!(
                    "{} {}\n",
                    self.icon(Icon::Success),
                    ColoredText::success("Project structure validated").render(c)
                ));
                out
            }

            DeployEvent::ProjectCreating { project, tier } => format!(
                "{}\n",
                ColoredText::warning(format!(
                    "Project \"{}\"{} not found. Creating...",
                    project,
                    tier.label()
                ))
                .render(c)
            ),

            DeployEvent::ProjectCreated { project, tier } => format!(
                "{} {}\n",
                self.icon(Icon::Success),
                ColoredText::success(format!("Project \"{}\"{} created.", project, tier.label()))
                    .render(c)
            ),

            DeployEvent::Archived { bytes } => format!(
                "{}\n",
                ColoredText::dim(format!("Bundled {} total bytes", bytes)).render(c)
            ),

            DeployEvent::Uploading => {
                format!("{}\n", ColoredText::warning("Uploading...").render(c))
            }

            DeployEvent::Queued => format!(
                "{}\n{}\n\n",
                ColoredText::success("Deployment successfully queued!").render(c),
                ColoredText::warning("Waiting for build to complete...").render(c)
            ),

            DeployEvent::BuildLog { chunk } => ColoredText::dim(chunk).render(c),

            DeployEvent::Deployed { slug, tier } => format!(
                "\n{} {}\n",
                self.icon(Icon::Success),
                ColoredText::success(format!("Deployed to {}{}!", slug, tier.label()))
                    .bold()
                    .render(c)
            ),

            DeployEvent::BuildFailed { full_log } => {
                let mut out = format!(
                    "\n{} {}\n",
                    self.icon(Icon::Error),
                    ColoredText::error("Build Failed!").bold().render(c)
                );
                if !full_log.trim().is_empty() {
                    out.push_str(&format!(
                        "\n{}\n{}\n{}\n\n",
                        ColoredText::warning("--- Full Build Log ---").render(c),
                        ColoredText::dim(full_log.trim_end()).render(c),
                        ColoredText::warning("--- End Build Log ---").render(c)
                    ));
                }
                out
            }

            // The timeout itself is reported as the command's error.
            DeployEvent::TimedOut { .. } => "\n".to_string(),

            DeployEvent::DeclarationsSynced { count } => format!(
                "{}\n",
                ColoredText::dim(format!("Synced {} YAML env declarations", count)).render(c)
            ),

            DeployEvent::DeclarationSyncFailed { error } => {
                self.warning_line(format!("Warning: Failed to sync YAML declarations: {}", error))
            }

            DeployEvent::EnvPushStarted => format!(
                "\n{}\n",
                ColoredText::info("Pushing environment variables...").render(c)
            ),

            DeployEvent::NoDeclarations => format!(
                "{}\n",
                ColoredText::dim("No environment variables declared in solidactions.yaml")
                    .render(c)
            ),

            DeployEvent::EnvFileMissing { file, keys } => {
                let mut out = self.warning_line(format!("{} not found, skipping env push", file));
                for key in keys {
                    out.push_str("  ");
                    out.push_str(&self.warning_line(format!("{}: no value (not in {})", key, file)));
                }
                out
            }

            DeployEvent::EnvKeyMissing { key, file } => {
                self.warning_line(format!("{}: not found in {}", key, file))
            }

            DeployEvent::NothingToPush => format!(
                "{}\n",
                ColoredText::warning("No matching environment variables to push").render(c)
            ),

            DeployEvent::EnvPushed {
                count,
                file,
                created,
                updated,
            } => {
                let mut out = format!(
                    "{} {}\n",
                    self.icon(Icon::Success),
                    ColoredText::success(format!(
                        "Pushed {} environment variables from {}",
                        count, file
                    ))
                    .render(c)
                );
                if created > 0 || updated > 0 {
                    out.push_str(&format!(
                        "{}\n",
                        ColoredText::dim(format!("  ({} created, {} updated)", created, updated))
                            .render(c)
                    ));
                }
                out
            }

            DeployEvent::EnvPushFailed { error } => {
                self.warning_line(format!("Failed to push environment variables: {}", error))
            }
        };
        Some(out)
    }
}

impl DeployEventSink for ConsoleDeploySink {
    fn on_event(&self, event: DeployEvent) {
        let Some(text) = self.render(event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.write_all(text.as_bytes());
            let _ = writer.flush();
        }
    }
}
