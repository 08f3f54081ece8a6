use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::{Project, StepType, Template, WorkflowStep};

/// Separator line used for visual formatting
const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Prints a title between separator lines
pub fn display_header(title: &str) {
    println!("{}\n{}\n{}", SEPARATOR, title.blue().bold(), SEPARATOR);
}

/// Starts a spinner shown while a generation is outstanding
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub fn print_template(template: &Template) {
    display_header(&format!("📋 {}", template.name));
    println!("{} {}", "id:".dimmed(), template.id);
    println!("{} {}", "category:".dimmed(), template.category.to_string().yellow());
    println!("{}\n", template.description.italic());
    if template.tasks.is_empty() {
        println!("{}", "(no tasks)".dimmed());
    }
    for (i, task) in template.tasks.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, task);
    }
}

pub fn print_project(project: &Project) {
    display_header(&format!("📁 {}", project.name));
    println!(
        "{} {}  {} {}  {} {}",
        "id:".dimmed(),
        project.id,
        "client:".dimmed(),
        project.client_id,
        "deadline:".dimmed(),
        project.deadline
    );
    println!(
        "{} {}  {} {}%",
        "status:".dimmed(),
        project.status,
        "progress:".dimmed(),
        project.progress
    );
    for task in &project.tasks {
        println!("  [ ] {} {}", task.title, format!("({})", task.id).dimmed());
    }
}

pub fn print_workflow(steps: &[WorkflowStep]) {
    display_header("⚡ Workflow");
    for (i, step) in steps.iter().enumerate() {
        let kind = match step.step_type {
            StepType::Trigger => "TRIGGER".green(),
            StepType::Action => "ACTION".blue(),
            StepType::Condition => "CONDITION".yellow(),
            StepType::AiAgent => "AI AGENT".magenta(),
        };
        let tool = step
            .tool
            .as_deref()
            .map(|t| format!(" [{}]", t))
            .unwrap_or_default();
        println!("{:>2}. {} {}{}", i + 1, kind.bold(), step.name.bold(), tool.cyan());
        println!("    {}", step.description);
    }
}
