use serde::Deserialize;

/// Envelope returned by the tarkov.dev GraphQL endpoint.
///
/// Every level is optional: a failed query may carry only `errors`, and a
/// wrong task id yields `"task": null`.
#[derive(Debug, Deserialize)]
pub struct TaskResponse {
    pub data: Option<TaskData>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct TaskData {
    pub task: Option<Task>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Task {
    pub name: Option<String>,
    pub objectives: Option<Vec<Option<Objective>>>,
}

/// Only `TaskObjectiveItem` objectives select fields, every other kind
/// comes back as `{}`.
#[derive(Debug, Default, Deserialize)]
pub struct Objective {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<Option<Item>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub grid_image_link: Option<String>,
}

impl TaskResponse {
    /// Messages of the `errors` array, if the API reported any.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|error| {
                error
                    .message
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string())
            })
            .collect()
    }

    pub fn task(&self) -> Option<&Task> {
        self.data.as_ref().and_then(|data| data.task.as_ref())
    }
}

impl Task {
    pub fn has_objectives(&self) -> bool {
        self.objectives
            .as_ref()
            .is_some_and(|objectives| !objectives.is_empty())
    }

    /// Items of every objective, in objective order then item order.
    /// Duplicates are kept.
    pub fn required_items(&self) -> Vec<Item> {
        self.objectives
            .iter()
            .flatten()
            .flatten()
            .filter_map(|objective| objective.items.as_ref())
            .flatten()
            .flatten()
            .cloned()
            .collect()
    }
}

impl Item {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Item")
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn icon_link(&self) -> Option<&str> {
        self.grid_image_link
            .as_deref()
            .filter(|link| !link.is_empty())
    }
}
