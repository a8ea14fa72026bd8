//! Application lifecycle: configure a session, replay, export.

use crate::cli::Cli;
use crate::clipboard;
use crate::error::{AppError, AppResult};
use crate::replay::{self, ReplaySummary};
use entigraph_core::{EditorConfig, EditorSession};
use std::io::{Read, Write};
use std::path::Path;

fn read_file(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Main application struct.
pub struct App {
    session: EditorSession,
}

impl App {
    /// Build the editor session described by the command line.
    pub fn from_cli(cli: &Cli) -> AppResult<Self> {
        let config = match &cli.config {
            Some(path) => {
                let config = EditorConfig::from_json(&read_file(path)?)?;
                log::info!("Loaded editor config from {}", path.display());
                config
            }
            None => EditorConfig::default(),
        };

        let mut session = EditorSession::new(config);
        if let Some(path) = &cli.import {
            session.import_json(&read_file(path)?)?;
            log::info!(
                "Imported {} node(s) from {}",
                session.graph().node_count(),
                path.display()
            );
        }
        Ok(Self { session })
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Replay a script into the session.
    pub fn replay(&mut self, script: &str) -> AppResult<ReplaySummary> {
        let steps = replay::parse_script(script)?;
        let summary = replay::replay(&mut self.session, steps)?;
        log::info!(
            "Replayed {} event(s): {} ignored, {} node(s) and {} edge(s) created",
            summary.handled + summary.ignored,
            summary.ignored,
            summary.nodes_created,
            summary.edges_created
        );
        Ok(summary)
    }

    /// Export the diagram to the file or stream requested on the command line.
    ///
    /// Clipboard failures are reported but do not fail the export.
    pub fn export(&self, cli: &Cli, stdout: &mut dyn Write) -> AppResult<()> {
        let mut json = self.session.export_json(!cli.compact)?;
        json.push('\n');

        match &cli.output {
            Some(path) => {
                std::fs::write(path, &json).map_err(|source| AppError::Write {
                    path: path.clone(),
                    source,
                })?;
                log::info!("Exported diagram to {}", path.display());
            }
            None => stdout.write_all(json.as_bytes()).map_err(|source| AppError::Write {
                path: "<stdout>".into(),
                source,
            })?,
        }

        if cli.clipboard {
            if let Err(e) = clipboard::copy_text(json.trim_end()) {
                log::warn!("{}", e);
                eprintln!("warning: could not copy to clipboard: {e}");
            }
        }
        Ok(())
    }

    /// Run the whole pipeline for `cli`.
    pub fn run(cli: Cli) -> AppResult<()> {
        let mut app = Self::from_cli(&cli)?;

        let script = match &cli.script {
            Some(path) => read_file(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).map_err(AppError::Stdin)?;
                buf
            }
        };

        app.replay(&script)?;
        app.export(&cli, &mut std::io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use entigraph_core::{GraphExport, TransformMode};
    use pretty_assertions::assert_eq;
    use std::fs;

    const SCRIPT: &str = r#"[
        { "type": "set_canvas_origin", "rect": { "x0": 0, "y0": 0, "x1": 1000, "y1": 800 } },
        { "type": "palette_drag_start", "entity": "employee" },
        { "type": "drop", "position": { "x": 190, "y": 130 }, "as": "$e" },
        { "type": "palette_drag_start", "entity": "company" },
        { "type": "drop", "position": { "x": 490, "y": 130 }, "as": "$c" },
        { "type": "connect", "source": "$e", "target": "$c" }
    ]"#;

    #[test]
    fn test_replay_and_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.json");
        let output = dir.path().join("diagram.json");
        fs::write(&script, SCRIPT).unwrap();

        let cli = Cli::parse_from([
            "entigraph",
            script.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        App::run(cli).unwrap();

        let export = GraphExport::from_json(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(export.nodes.len(), 2);
        assert_eq!(export.edges.len(), 1);
        assert_eq!(export.nodes[0].data.label, "Employee");
        assert_eq!((export.nodes[0].position.x, export.nodes[0].position.y), (160.0, 100.0));
    }

    #[test]
    fn test_config_file_changes_transform() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("editor.json");
        fs::write(&config, r#"{ "transform_mode": "viewport_aware", "animated_edges": false }"#).unwrap();

        let cli = Cli::parse_from(["entigraph", "--config", config.to_str().unwrap()]);
        let mut app = App::from_cli(&cli).unwrap();
        assert_eq!(app.session().config().transform_mode, TransformMode::ViewportAware);
        app.replay(SCRIPT).unwrap();

        // Viewport-aware drops center the 180x60 node on the pointer
        let export = app.session().export();
        assert_eq!((export.nodes[0].position.x, export.nodes[0].position.y), (100.0, 100.0));
        assert!(!export.edges[0].animated);
    }

    #[test]
    fn test_export_to_stdout_and_import() {
        let cli = Cli::parse_from(["entigraph", "--compact"]);
        let mut app = App::from_cli(&cli).unwrap();
        app.replay(SCRIPT).unwrap();

        let mut out = Vec::new();
        app.export(&cli, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);

        let dir = tempfile::tempdir().unwrap();
        let saved = dir.path().join("saved.json");
        fs::write(&saved, &text).unwrap();
        let cli = Cli::parse_from(["entigraph", "--import", saved.to_str().unwrap()]);
        let restored = App::from_cli(&cli).unwrap();
        assert_eq!(restored.session().export(), app.session().export());
    }

    #[test]
    fn test_missing_script_file() {
        let cli = Cli::parse_from(["entigraph", "/definitely/not/here.json"]);
        assert!(matches!(App::run(cli), Err(AppError::Read { .. })));
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("editor.json");
        fs::write(&config, r#"{ "min_zoom": 0 }"#).unwrap();
        let cli = Cli::parse_from(["entigraph", "--config", config.to_str().unwrap()]);
        assert!(matches!(App::from_cli(&cli), Err(AppError::Graph(_))));
    }
}
