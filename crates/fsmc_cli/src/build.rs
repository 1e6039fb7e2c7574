//! The compile pipeline behind the `fsmc` command.
//!
//! Loads the table file, compiles it, then renders the requested artefacts
//! in memory. Files are written only once every artefact rendered, so a
//! failing run never leaves a partial module behind.

use std::fs;
use std::path::{Path, PathBuf};

use fsmc_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, JsonRenderer, TerminalRenderer,
};
use tracing::debug;

use crate::{Cli, GlobalArgs, ReportFormat};

/// Runs the compiler. Returns exit code 0 on success, 1 on error.
pub fn run(cli: &Cli, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = fsmc_config::load_config(&cli.table)?;

    if !global.quiet {
        eprintln!("   Compiling {} ({})", config.fsm.name, cli.table.display());
    }

    let sink = DiagnosticSink::new();
    let fsm = fsmc_compile::compile_config(&config, &sink);
    render_and_report(&sink, cli.format, global);

    let Some(fsm) = fsm else {
        return Ok(1);
    };
    if sink.has_errors() {
        return Ok(1);
    }

    if !global.quiet {
        eprintln!(
            "   Compiled {}: {} states, {} transitions, {} groups",
            fsm.name,
            fsm.states.len() + 1,
            fsm.transitions.len(),
            fsm.groups.group_count()
        );
    }

    let mut outputs: Vec<(PathBuf, String)> = Vec::new();
    if cli.verilog {
        let text = fsmc_codegen::generate_rtl(&fsm)?;
        outputs.push((output_path(&cli.out_folder, &fsm.name, "sv"), text));
    }
    if cli.graph {
        let diagram = fsmc_codegen::build_diagram(&fsm)?;
        outputs.push((output_path(&cli.out_folder, &fsm.name, "gv"), diagram.to_dot()));
    }

    if outputs.is_empty() {
        if !global.quiet {
            eprintln!("   Checked {} (no outputs requested, pass -v or -g)", fsm.name);
        }
        return Ok(0);
    }

    fs::create_dir_all(&cli.out_folder)?;
    for (path, text) in &outputs {
        fs::write(path, text)?;
        debug!(path = %path.display(), bytes = text.len(), "wrote output");
        if !global.quiet {
            eprintln!("   Generated {}", path.display());
        }
    }

    Ok(0)
}

/// Returns `<folder>/<stem>.<ext>`.
fn output_path(folder: &Path, stem: &str, ext: &str) -> PathBuf {
    folder.join(format!("{stem}.{ext}"))
}

/// Renders each diagnostic with the renderer for `format`, one entry per
/// diagnostic. JSON entries are single lines.
fn render_diagnostics(
    diagnostics: &[Diagnostic],
    format: ReportFormat,
    color: bool,
) -> Vec<String> {
    let renderer: Box<dyn DiagnosticRenderer> = match format {
        ReportFormat::Text => Box::new(TerminalRenderer::new(color)),
        ReportFormat::Json => Box::new(JsonRenderer),
    };
    diagnostics.iter().map(|diag| renderer.render(diag)).collect()
}

fn render_and_report(sink: &DiagnosticSink, format: ReportFormat, global: &GlobalArgs) {
    let diagnostics = sink.diagnostics();
    if diagnostics.is_empty() {
        return;
    }

    for rendered in render_diagnostics(&diagnostics, format, global.color) {
        match format {
            ReportFormat::Text => eprintln!("{rendered}"),
            ReportFormat::Json => println!("{rendered}"),
        }
    }

    if !global.quiet && format == ReportFormat::Text {
        eprintln!(
            "   Result: {} error(s), {} warning(s)",
            sink.error_count(),
            sink.warning_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const COUNTER: &str = r#"
[fsm]
default_state = "IDLE"

[outputs.done]
default = 0

[[transitions]]
from = "IDLE"
to = "S1"
when = "valid = 1 and clear = 0"
set = "count = 1"

[[transitions]]
from = "S1"
to = "S2"
when = "valid = 1 and clear = 0"
set = "count = 2"

[[transitions]]
from = "S2"
to = "IDLE"
when = "clear = 1"
set = "count = 0 and done = 1"
"#;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
        }
    }

    fn write_table(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("fsmc.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("fsmc").chain(args.iter().copied()))
    }

    #[test]
    fn writes_both_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let table = write_table(dir.path(), COUNTER);
        let out = dir.path().join("gen");
        let cli = cli(&[
            table.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-g",
            "-v",
        ]);

        assert_eq!(run(&cli, &quiet()).unwrap(), 0);

        let sv = fs::read_to_string(out.join("ctrl.sv")).unwrap();
        assert!(sv.contains("module ctrl"));
        assert!(sv.contains("endmodule:ctrl"));
        let gv = fs::read_to_string(out.join("ctrl.gv")).unwrap();
        assert!(gv.starts_with("digraph"));
    }

    #[test]
    fn verilog_only() {
        let dir = tempfile::tempdir().unwrap();
        let table = write_table(dir.path(), COUNTER);
        let out = dir.path().join("gen");
        let cli = cli(&[table.to_str().unwrap(), "-o", out.to_str().unwrap(), "-v"]);

        assert_eq!(run(&cli, &quiet()).unwrap(), 0);
        assert!(out.join("ctrl.sv").exists());
        assert!(!out.join("ctrl.gv").exists());
    }

    #[test]
    fn module_name_sets_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let content = COUNTER.replace("[fsm]\n", "[fsm]\nname = \"counter\"\n");
        let table = write_table(dir.path(), &content);
        let out = dir.path().join("gen");
        let cli = cli(&[table.to_str().unwrap(), "-o", out.to_str().unwrap(), "-v"]);

        assert_eq!(run(&cli, &quiet()).unwrap(), 0);
        let sv = fs::read_to_string(out.join("counter.sv")).unwrap();
        assert!(sv.contains("module counter"));
    }

    #[test]
    fn check_only_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let table = write_table(dir.path(), COUNTER);
        let out = dir.path().join("gen");
        let cli = cli(&[table.to_str().unwrap(), "-o", out.to_str().unwrap()]);

        assert_eq!(run(&cli, &quiet()).unwrap(), 0);
        assert!(!out.exists());
    }

    #[test]
    fn compile_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let content = COUNTER.replace("clear = 1\"", "clear == 1\"");
        let table = write_table(dir.path(), &content);
        let out = dir.path().join("gen");
        let cli = cli(&[
            table.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-g",
            "-v",
        ]);

        assert_eq!(run(&cli, &quiet()).unwrap(), 1);
        assert!(!out.exists());
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli(&[dir.path().join("absent.toml").to_str().unwrap()]);
        assert!(run(&cli, &quiet()).is_err());
    }

    #[test]
    fn json_report_is_one_object_per_line() {
        let config = fsmc_config::load_config_from_str(&COUNTER.replace("clear = 1\"", "clear == 1\""))
            .unwrap();
        let sink = DiagnosticSink::new();
        assert!(fsmc_compile::compile_config(&config, &sink).is_none());

        let lines = render_diagnostics(&sink.diagnostics(), ReportFormat::Json, false);
        assert_eq!(lines.len(), sink.diagnostics().len());
        for line in &lines {
            assert!(!line.contains('\n'));
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["severity"], "error");
        }
    }

    #[test]
    fn text_report_uses_terminal_layout() {
        let config = fsmc_config::load_config_from_str(&COUNTER.replace("clear = 1\"", "clear == 1\""))
            .unwrap();
        let sink = DiagnosticSink::new();
        fsmc_compile::compile_config(&config, &sink);

        let lines = render_diagnostics(&sink.diagnostics(), ReportFormat::Text, false);
        assert!(lines[0].starts_with("error[E103]"), "{}", lines[0]);
    }

    #[test]
    fn output_path_joins_stem() {
        assert_eq!(
            output_path(Path::new("out"), "ctrl", "sv"),
            PathBuf::from("out").join("ctrl.sv")
        );
    }
}
