//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use lanekit_actions::{ActionInfo, ActionOutcome, LaneReport};
use lanekit_types::ColorChoice;
use serde_json::{json, Value};
use std::io;

/// Final result of a command
pub enum CommandResult {
    ActionList(Vec<&'static ActionInfo>),
    ActionDetail(&'static ActionInfo),
    ActionRun(ActionOutcome),
    LaneRun(LaneReport),
}

impl CommandResult {
    /// JSON form used with `--json`
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let value = match self {
            CommandResult::ActionList(infos) => {
                Value::Array(infos.iter().map(|info| action_summary_json(info)).collect())
            }
            CommandResult::ActionDetail(info) => action_detail_json(info),
            CommandResult::ActionRun(outcome) => serde_json::to_value(outcome)?,
            CommandResult::LaneRun(report) => serde_json::to_value(report)?,
        };
        Ok(value)
    }
}

fn action_summary_json(info: &ActionInfo) -> Value {
    json!({
        "name": info.name,
        "category": info.category,
        "description": info.description,
    })
}

fn action_detail_json(info: &ActionInfo) -> Value {
    let options: Vec<Value> = info
        .options
        .iter()
        .map(|spec| {
            json!({
                "key": spec.key,
                "env_name": spec.env_name,
                "description": spec.description,
                "type": spec.kind.label(),
                "optional": spec.optional,
                "default": spec.default_value,
            })
        })
        .collect();
    let outputs: Vec<Value> = info
        .outputs
        .iter()
        .map(|(name, description)| json!({ "name": name, "description": description }))
        .collect();
    let platforms: Vec<&str> = info.platforms.iter().map(|p| p.as_str()).collect();

    json!({
        "name": info.name,
        "description": info.description,
        "details": info.details,
        "authors": info.authors,
        "category": info.category,
        "platforms": platforms,
        "options": options,
        "outputs": outputs,
        "return_value": info.return_value,
    })
}

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render command result
    pub fn render_result(&self, result: &CommandResult) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_text(result)
        }
    }

    /// Render as JSON
    fn render_json(&self, result: &CommandResult) -> io::Result<()> {
        let value = result.to_json().map_err(io::Error::other)?;
        let json = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    fn render_text(&self, result: &CommandResult) -> io::Result<()> {
        match result {
            CommandResult::ActionList(infos) => self.render_action_list(infos),
            CommandResult::ActionDetail(info) => self.render_action_detail(info),
            CommandResult::ActionRun(outcome) => self.render_outcome(outcome),
            CommandResult::LaneRun(report) => self.render_lane_report(report),
        }
    }

    fn render_action_list(&self, infos: &[&'static ActionInfo]) -> io::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Action").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
        ]);

        for info in infos {
            table.add_row(vec![
                Cell::new(info.name),
                Cell::new(info.category.as_str()),
                Cell::new(info.description),
            ]);
        }

        self.term.write_line(&table.to_string())
    }

    fn render_action_detail(&self, info: &ActionInfo) -> io::Result<()> {
        self.term.write_line(&self.style_name(info.name))?;
        self.term.write_line("")?;
        self.term.write_line(info.description)?;
        self.term.write_line(info.details)?;
        self.term.write_line("")?;

        let platforms: Vec<&str> = info.platforms.iter().map(|p| p.as_str()).collect();
        self.term
            .write_line(&format!("Category:  {}", info.category.as_str()))?;
        self.term
            .write_line(&format!("Platforms: {}", platforms.join(", ")))?;
        self.term
            .write_line(&format!("Authors:   {}", info.authors.join(", ")))?;
        self.term.write_line("")?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Key").add_attribute(Attribute::Bold),
            Cell::new("Environment").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Required").add_attribute(Attribute::Bold),
            Cell::new("Default").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
        ]);
        for spec in info.options {
            let required = if spec.optional {
                Cell::new("no")
            } else {
                Cell::new("yes").fg(Color::Yellow)
            };
            table.add_row(vec![
                Cell::new(spec.key),
                Cell::new(spec.env_name),
                Cell::new(spec.kind.label()),
                required,
                Cell::new(spec.default_value.unwrap_or("-")),
                Cell::new(spec.description),
            ]);
        }
        self.term.write_line(&table.to_string())?;

        if !info.outputs.is_empty() {
            self.term.write_line("")?;
            self.term.write_line("Outputs:")?;
            for (name, description) in info.outputs {
                self.term.write_line(&format!("  {name}: {description}"))?;
            }
        }

        if let Some(return_value) = info.return_value {
            self.term.write_line("")?;
            self.term
                .write_line(&format!("Returns: {return_value}"))?;
        }

        Ok(())
    }

    /// Returned value first so it can be captured by a shell
    fn render_outcome(&self, outcome: &ActionOutcome) -> io::Result<()> {
        if let Some(value) = &outcome.value {
            self.term.write_line(value)?;
        }
        for (key, value) in &outcome.published {
            self.term.write_line(&format!("{key}={value}"))?;
        }
        Ok(())
    }

    fn render_lane_report(&self, report: &LaneReport) -> io::Result<()> {
        for (key, value) in report.outputs.iter() {
            self.term.write_line(&format!("{key}={value}"))?;
        }
        Ok(())
    }

    fn style_name(&self, name: &str) -> String {
        if self.supports_color() {
            Style::new()
                .bold()
                .force_styling(true)
                .apply_to(name)
                .to_string()
        } else {
            name.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}
