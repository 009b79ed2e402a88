//! Structured-output descriptors for each orchestration operation
//!
//! Agent-name fields are rendered as closed enumerations over the roster
//! passed in at call time, so providers cannot invent owners.

use crate::domain::Agent;
use crate::llm::{SchemaDescriptor, Shape};

fn names(agents: &[Agent]) -> Vec<String> {
    agents.iter().map(|a| a.name.clone()).collect()
}

/// Board seeding: an array of backlog task drafts
pub fn initial_tasks(agents: &[Agent]) -> SchemaDescriptor {
    SchemaDescriptor::wrapped(
        Shape::array(Shape::object(
            vec![
                ("content", Shape::string_described("Task description, under 15 words.")),
                ("agentName", Shape::enumeration(names(agents))),
                ("stage", Shape::enumeration(["Backlog"])),
            ],
            &["content", "agentName", "stage"],
        )),
        "tasks",
        "submit_initial_tasks",
        "Submit the generated starting tasks for the crew.",
    )
}

/// Stage-transition hand-off: one suggestion object
pub fn handoff(agents: &[Agent]) -> SchemaDescriptor {
    SchemaDescriptor::object(
        Shape::object(
            vec![
                ("suggestedAgent", Shape::enumeration(names(agents))),
                ("nextAction", Shape::string_described("Brief next step (under 10 words).")),
            ],
            &["suggestedAgent", "nextAction"],
        ),
        "submit_handoff_suggestion",
        "Submit the hand-off suggestion for the moved task.",
    )
}

/// Calendar-note conversion: one task draft
pub fn task_from_note(agents: &[Agent]) -> SchemaDescriptor {
    SchemaDescriptor::object(
        Shape::object(
            vec![
                ("content", Shape::string_described("Actionable task content.")),
                ("agentName", Shape::enumeration(names(agents))),
            ],
            &["content", "agentName"],
        ),
        "submit_task_from_note",
        "Submit the task generated from the calendar note.",
    )
}

/// Skill growth: an array of new skill names
pub fn skill_suggestions() -> SchemaDescriptor {
    SchemaDescriptor::wrapped(
        Shape::array(Shape::string_described("A new skill name.")),
        "skills",
        "submit_skill_suggestions",
        "Submit the suggested new skills for the agent.",
    )
}

/// Tasks exercising newly gained skills: an array of task descriptions
///
/// The owning agent is fixed by the call, so only the descriptions travel.
pub fn skill_tasks() -> SchemaDescriptor {
    SchemaDescriptor::wrapped(
        Shape::array(Shape::string_described("Task description, under 15 words.")),
        "tasks",
        "submit_task_suggestions",
        "Submit task descriptions that exercise the agent's new skills.",
    )
}

/// Operator command: response text plus an optional task draft
pub fn command(agents: &[Agent]) -> SchemaDescriptor {
    SchemaDescriptor::object(
        Shape::object(
            vec![
                ("responseText", Shape::string_described("Direct response to the operator.")),
                (
                    "newTask",
                    Shape::object(
                        vec![
                            ("content", Shape::string()),
                            ("agentName", Shape::enumeration(names(agents))),
                        ],
                        &["content", "agentName"],
                    ),
                ),
            ],
            &["responseText"],
        ),
        "submit_orchestration_response",
        "Submit the orchestrator's response to the operator command.",
    )
}

/// Advisor hints: an array of command strings
pub fn hints() -> SchemaDescriptor {
    SchemaDescriptor::wrapped(
        Shape::array(Shape::string_described("A suggested operator command.")),
        "hints",
        "submit_command_hints",
        "Submit suggested operator commands.",
    )
}
