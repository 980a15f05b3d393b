use anyhow::{anyhow, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use walsa_catalog::{MissingDescriptor, ValidationReport};
use walsa_core::{CatalogGroup, MethodKey};
use walsa_resolver::{ControlState, DisplayPayload, ParameterRow, ParameterTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
    Html,
}

impl OutputFormat {
    /// Parses the `output.format` configuration value.
    pub fn from_config(value: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(value, true).map_err(|e| anyhow!(e))
    }
}

/// One row of `catalog list`.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct MethodSummary {
    #[tabled(rename = "Group")]
    pub group: CatalogGroup,
    #[tabled(rename = "Method")]
    pub method: MethodKey,
    #[tabled(rename = "Name")]
    pub label: &'static str,
    #[tabled(rename = "Parameters")]
    pub parameters: usize,
    #[tabled(rename = "Returns")]
    pub return_values: String,
}

/// Result of `catalog show`.
#[derive(Debug, Clone, Serialize)]
pub struct MethodDetail {
    pub group: CatalogGroup,
    pub method: MethodKey,
    pub return_values: String,
    pub parameters: ParameterTable,
}

/// Anything a subcommand prints.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    Payload(DisplayPayload),
    Controls(Vec<ControlState>),
    Methods(Vec<MethodSummary>),
    Method(MethodDetail),
    Validation(ValidationReport),
}

#[derive(Tabled)]
struct ParameterLine {
    #[tabled(rename = "Parameter")]
    name: String,
    #[tabled(rename = "Type")]
    type_label: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<ParameterRow> for ParameterLine {
    fn from(row: ParameterRow) -> Self {
        Self {
            name: row.name,
            type_label: row.type_label,
            description: row.description,
        }
    }
}

#[derive(Tabled)]
struct ControlLine {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "State")]
    state: &'static str,
    #[tabled(rename = "Selected")]
    selected: String,
    #[tabled(rename = "Options")]
    options: String,
}

impl From<&ControlState> for ControlLine {
    fn from(control: &ControlState) -> Self {
        Self {
            field: control.field.to_string(),
            state: control_state_word(control),
            selected: control
                .selected
                .map(|v| v.label().to_string())
                .unwrap_or_else(|| control.placeholder.to_string()),
            options: control
                .options
                .iter()
                .map(|o| o.value.code())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Tabled)]
struct MissingLine {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Method")]
    method: String,
}

impl From<&MissingDescriptor> for MissingLine {
    fn from(missing: &MissingDescriptor) -> Self {
        Self {
            field: missing.field.to_string(),
            group: missing.group.to_string(),
            method: missing.method.to_string(),
        }
    }
}

fn control_state_word(control: &ControlState) -> &'static str {
    if !control.visible {
        "hidden"
    } else if control.enabled {
        "enabled"
    } else {
        "disabled"
    }
}

pub fn render(format: OutputFormat, output: &CommandOutput) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(output),
        OutputFormat::Pretty => render_pretty(output),
        OutputFormat::Table => render_table(output),
        OutputFormat::Html => render_html(output),
    }
}

fn render_json(output: &CommandOutput) -> Result<String> {
    let text = match output {
        CommandOutput::Payload(payload) => serde_json::to_string_pretty(payload)?,
        CommandOutput::Controls(controls) => serde_json::to_string_pretty(controls)?,
        CommandOutput::Methods(methods) => serde_json::to_string_pretty(methods)?,
        CommandOutput::Method(detail) => serde_json::to_string_pretty(detail)?,
        CommandOutput::Validation(report) => serde_json::to_string_pretty(report)?,
    };
    Ok(text)
}

fn render_pretty(output: &CommandOutput) -> Result<String> {
    let mut out = String::new();
    match output {
        CommandOutput::Payload(payload) => {
            if !payload.visible {
                let message = payload
                    .message
                    .map(|m| m.to_string())
                    .unwrap_or_default();
                writeln!(out, "{}", message.yellow())?;
                pretty_controls(&mut out, &payload.controls)?;
            } else {
                writeln!(out, "{}", "Calling sequence".cyan().bold())?;
                writeln!(out, "{}{}", ">>> ".dimmed(), payload.call_text.green())?;
                writeln!(out)?;
                writeln!(out, "{}", "Parameters".cyan().bold())?;
                pretty_rows(&mut out, &payload.parameter_rows)?;
            }
        }
        CommandOutput::Controls(controls) => pretty_controls(&mut out, controls)?,
        CommandOutput::Methods(methods) => {
            for m in methods {
                writeln!(
                    out,
                    "{}.{} {} ({} parameters)",
                    m.group.to_string().cyan(),
                    m.method.to_string().cyan().bold(),
                    m.label,
                    m.parameters.to_string().yellow()
                )?;
                writeln!(out, "    {} {}", "returns:".dimmed(), m.return_values.green())?;
            }
        }
        CommandOutput::Method(detail) => {
            writeln!(
                out,
                "{}.{}",
                detail.group.to_string().cyan(),
                detail.method.to_string().cyan().bold()
            )?;
            writeln!(out, "{} {}", "Returns:".bold(), detail.return_values.green())?;
            writeln!(out)?;
            pretty_rows(&mut out, &detail.parameters)?;
        }
        CommandOutput::Validation(report) => {
            if report.is_clean() {
                writeln!(out, "{}", report.to_string().green())?;
            } else {
                writeln!(out, "{}", report.to_string().red())?;
            }
        }
    }
    Ok(out)
}

fn pretty_rows(out: &mut String, table: &ParameterTable) -> Result<()> {
    for row in table.display_rows() {
        if row.name.is_empty() {
            writeln!(out, "  {}", row.description.italic())?;
        } else {
            writeln!(
                out,
                "  {} ({}): {}",
                row.name.yellow().bold(),
                row.type_label,
                row.description
            )?;
        }
    }
    Ok(())
}

fn pretty_controls(out: &mut String, controls: &[ControlState]) -> Result<()> {
    for control in controls {
        if !control.visible {
            continue;
        }
        let selected = match control.selected {
            Some(value) => value.label().green().to_string(),
            None => control.placeholder.dimmed().to_string(),
        };
        let state = match control_state_word(control) {
            "enabled" => "enabled".green(),
            other => other.red(),
        };
        writeln!(
            out,
            "{}: {} [{}]",
            control.field.to_string().cyan().bold(),
            selected,
            state
        )?;
        for option in &control.options {
            writeln!(out, "    {} {}", option.value.code().yellow(), option.label)?;
        }
    }
    Ok(())
}

fn render_table(output: &CommandOutput) -> Result<String> {
    let text = match output {
        CommandOutput::Payload(payload) if payload.visible => format!(
            "{}\n{}",
            payload.call_text,
            parameter_table(&payload.parameter_rows)
        ),
        CommandOutput::Payload(payload) => format!(
            "{}\n{}",
            payload.message.map(|m| m.to_string()).unwrap_or_default(),
            control_table(&payload.controls)
        ),
        CommandOutput::Controls(controls) => control_table(controls),
        CommandOutput::Methods(methods) => Table::new(methods).with(Style::rounded()).to_string(),
        CommandOutput::Method(detail) => format!(
            "{}.{}: {}\n{}",
            detail.group,
            detail.method,
            detail.return_values,
            parameter_table(&detail.parameters)
        ),
        CommandOutput::Validation(report) if report.is_clean() => report.to_string(),
        CommandOutput::Validation(report) => format!(
            "{}\n{}",
            report,
            Table::new(report.missing.iter().map(MissingLine::from))
                .with(Style::rounded())
                .to_string()
        ),
    };
    Ok(text)
}

fn parameter_table(table: &ParameterTable) -> String {
    Table::new(table.display_rows().into_iter().map(ParameterLine::from))
        .with(Style::rounded())
        .to_string()
}

fn control_table(controls: &[ControlState]) -> String {
    Table::new(controls.iter().map(ControlLine::from))
        .with(Style::rounded())
        .to_string()
}

fn render_html(output: &CommandOutput) -> Result<String> {
    let mut out = String::new();
    match output {
        CommandOutput::Payload(payload) => {
            if !payload.visible {
                let message = payload.message.map(|m| m.to_string()).unwrap_or_default();
                writeln!(out, "<p class=\"walsa-message\">{}</p>", escape_html(&message))?;
                html_controls(&mut out, &payload.controls)?;
            } else {
                html_calling_sequence(&mut out, &payload.call_text)?;
                html_rows(&mut out, &payload.parameter_rows)?;
            }
        }
        CommandOutput::Controls(controls) => html_controls(&mut out, controls)?,
        CommandOutput::Methods(methods) => {
            for m in methods {
                writeln!(
                    out,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(m.group.key()),
                    escape_html(m.method.key()),
                    escape_html(&m.return_values)
                )?;
            }
        }
        CommandOutput::Method(detail) => html_rows(&mut out, &detail.parameters)?,
        CommandOutput::Validation(report) => {
            writeln!(out, "<p>{}</p>", escape_html(&report.to_string()))?
        }
    }
    Ok(out)
}

fn html_calling_sequence(out: &mut String, call_text: &str) -> Result<()> {
    writeln!(out, "<div style=\"display: flex; align-items: baseline;\">")?;
    writeln!(
        out,
        "    <span style=\"color: #222; min-width: 4ch; margin: 0 !important; line-height: 1.5;\">&gt;&gt;&gt; </span>"
    )?;
    writeln!(
        out,
        "    <pre style=\"white-space: pre-wrap; word-wrap: break-word; color: #01016D; margin: 0 !important; line-height: 1.5;\">{}</pre>",
        escape_html(call_text)
    )?;
    writeln!(out, "</div>")?;
    Ok(())
}

fn html_rows(out: &mut String, table: &ParameterTable) -> Result<()> {
    match table {
        ParameterTable::Unavailable => {
            writeln!(
                out,
                "<tr><td colspan=\"3\" style=\"text-align: center;\">{}</td></tr>",
                escape_html(walsa_catalog::NO_PARAMETERS)
            )?;
        }
        ParameterTable::Rows(rows) => {
            for row in rows {
                writeln!(
                    out,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(&row.name),
                    escape_html(&row.type_label),
                    escape_html(&row.description)
                )?;
            }
        }
    }
    Ok(())
}

fn html_controls(out: &mut String, controls: &[ControlState]) -> Result<()> {
    for control in controls.iter().filter(|c| c.visible) {
        let disabled = if control.enabled { "" } else { " disabled" };
        writeln!(out, "<select name=\"{}\"{}>", control.field, disabled)?;
        writeln!(
            out,
            "    <option value=\"\">{}</option>",
            escape_html(control.placeholder)
        )?;
        for option in &control.options {
            let selected = if control.selected == Some(option.value) {
                " selected"
            } else {
                ""
            };
            writeln!(
                out,
                "    <option value=\"{}\"{}>{}</option>",
                escape_html(option.value.code()),
                selected,
                escape_html(option.label)
            )?;
        }
        writeln!(out, "</select>")?;
    }
    Ok(())
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
