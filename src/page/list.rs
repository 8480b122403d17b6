use crate::lessons::LessonError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Running number assigned when the item was added
    pub id: u64,
    pub text: String,
}

impl ListItem {
    pub fn label(&self) -> String {
        format!("{}. {}", self.id, self.text)
    }
}

/// List that numbers items in insertion order. Removing an item does not
/// free its number; only [`clear`](Self::clear) restarts numbering.
#[derive(Debug, Clone, Default)]
pub struct DynamicList {
    items: Vec<ListItem>,
    added: u64,
}

impl DynamicList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, text: &str) -> Result<&ListItem, LessonError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LessonError::EmptyItem);
        }

        self.added += 1;
        self.items.push(ListItem {
            id: self.added,
            text: text.to_string(),
        });
        tracing::debug!(id = self.added, text, "list item added");
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn remove(&mut self, id: u64) -> Result<ListItem, LessonError> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(LessonError::ItemNotFound(id))?;
        let item = self.items.remove(position);
        tracing::debug!(id, text = %item.text, "list item removed");
        Ok(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.added = 0;
        tracing::debug!("list cleared");
    }
}
