//! Prompt composition for the text provider.
//!
//! Pure string building: the system prompt that tells a model how to lay out
//! its answer so [`extract`](crate::domain::extract) can read it back, the
//! scaffold prefix, and a small registry of ready-made project prompts.

use crate::domain::entities::{GenerationContext, ScaffoldName};

/// Instructions sent as the system prompt on every generation request.
///
/// The layout it asks for (one fence per file, `path:` on the first line
/// inside the fence) is exactly what the extractor recognises.
pub const SYSTEM_PROMPT: &str = "\
You are a senior software engineer who writes complete, runnable projects.

Rules:
1. Produce every file the project needs, with all imports and dependencies.
2. Follow the conventions of the language and framework in use.
3. Handle errors and document non-obvious code.
4. Put each file in its own fenced code block.

Inside each fenced block, the first line is the file path followed by a colon,
and the file content starts on the next line:

```python
src/app/main.py:
print(\"hello\")
```

Use forward slashes for directories and keep every path relative.
";

/// A ready-made prompt for a common project shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PromptPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

pub const PROMPT_PRESETS: &[PromptPreset] = &[
    PromptPreset {
        id: "rest-api",
        name: "REST API",
        description: "A basic RESTful API with Flask or FastAPI",
        prompt: "Build a RESTful API for a small task manager. Tasks have an id, title, \
                 description, completed flag and created_at timestamp. Provide full CRUD \
                 endpoints using Flask or FastAPI with SQLAlchemy for persistence, and \
                 validate input and report errors with proper status codes.",
    },
    PromptPreset {
        id: "auth-system",
        name: "Authentication System",
        description: "User registration, login and JWT authentication",
        prompt: "Build an authentication service with user registration, login and JWT \
                 issuing. Hash passwords, verify email addresses and support password \
                 resets. Use Python with Flask, SQLAlchemy and PyJWT.",
    },
    PromptPreset {
        id: "file-upload",
        name: "File Upload Service",
        description: "Validated file uploads with configurable storage",
        prompt: "Build a file upload service that accepts several file types, validates \
                 size limits and MIME types, stores uploads safely and hands out secure \
                 download links. Use Python with Flask and make the storage location \
                 configurable (local disk or cloud storage).",
    },
    PromptPreset {
        id: "websocket-chat",
        name: "WebSocket Chat",
        description: "Real-time chat over WebSockets",
        prompt: "Build a real-time chat application over WebSockets with multiple rooms, \
                 user nicknames and message history. Use Flask-SocketIO on the server and \
                 include a minimal HTML/JS client for trying it out.",
    },
];

/// Look up a preset by id (case-insensitive).
pub fn find_preset(id: &str) -> Option<&'static PromptPreset> {
    PROMPT_PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
}

/// Build the user prompt sent alongside [`SYSTEM_PROMPT`].
///
/// Without a scaffold the prompt is passed through unchanged. With one, it is
/// prefixed by a line naming the scaffold and, when the context has
/// variables, the context as pretty-printed JSON.
pub fn compose_user_prompt(
    prompt: &str,
    scaffold: Option<ScaffoldName>,
    context: &GenerationContext,
) -> String {
    let Some(scaffold) = scaffold else {
        return prompt.to_string();
    };

    let mut out = format!("\n\nUse the {scaffold} template as a starting point.");
    if !context.is_empty() {
        // A string-to-string map always serializes.
        if let Ok(json) = serde_json::to_string_pretty(context) {
            out.push_str(" Context: ");
            out.push_str(&json);
        }
    }
    out.push_str("\n\n");
    out.push_str(prompt);
    out
}
