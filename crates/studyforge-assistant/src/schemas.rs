//! Response schemas for structured generation.

use studyforge_llm::Schema;

pub fn flashcards() -> Schema {
    Schema::array(Schema::object([
        ("question", Schema::string()),
        ("answer", Schema::string()),
    ]))
}

pub fn quiz() -> Schema {
    Schema::array(Schema::object([
        ("question", Schema::string()),
        ("options", Schema::array(Schema::string())),
        ("correctAnswer", Schema::string()),
    ]))
}

pub fn study_plan() -> Schema {
    let task = Schema::object([
        (
            "description",
            Schema::string().describe("A detailed description of the task."),
        ),
        (
            "type",
            Schema::string()
                .describe("The type of task, e.g., 'Read', 'Watch', 'Practice', 'Review', 'Quiz'."),
        ),
    ]);

    let period = Schema::object([
        (
            "period",
            Schema::string()
                .describe("The time period for this part of the plan, e.g., 'Day 1' or 'Week 1'."),
        ),
        (
            "topics",
            Schema::array(Schema::string())
                .describe("A list of specific topics to cover in this period."),
        ),
        ("tasks", Schema::array(task)),
    ]);

    Schema::object([
        ("planTitle", Schema::string()),
        ("schedule", Schema::array(period)),
    ])
}
