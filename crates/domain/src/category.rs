//! Category: the catalogue tree products are filed under.
//!
//! A category optionally points at a parent; the resulting forest must stay
//! acyclic. Cycle detection needs the stored ancestors and so lives in the
//! application service; this module owns the record and request validation.

use serde::{Deserialize, Serialize};

use crate::Timestamp;
use crate::error::{EstoreError, ValidationError};
use crate::id::CategoryId;

/// Whether a category is offered in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

impl CategoryStatus {
    /// Upper-case name used on the wire and in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Inverse of [`CategoryStatus::as_str`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// A stored catalogue category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub status: CategoryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    /// New categories start out active.
    #[must_use]
    pub fn from_draft(draft: ValidatedCategory) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: CategoryId::new(),
            name: draft.name,
            description: draft.description,
            image_url: draft.image_url,
            parent_id: draft.parent_id,
            status: CategoryStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite name, description and parent.
    ///
    /// A missing parent detaches the category to the top level. The image
    /// is only replaced when the draft carries one.
    pub fn apply(&mut self, draft: ValidatedCategory) {
        self.name = draft.name;
        self.description = draft.description;
        if draft.image_url.is_some() {
            self.image_url = draft.image_url;
        }
        self.parent_id = draft.parent_id;
        self.updated_at = chrono::Utc::now();
    }

    /// Change the status, returning whether it differed.
    pub fn set_status(&mut self, status: CategoryStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.updated_at = chrono::Utc::now();
        true
    }
}

/// Create/update request for a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_category_id: Option<CategoryId>,
}

/// A [`CategoryDraft`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCategory {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<CategoryId>,
}

impl CategoryDraft {
    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] when the name is blank.
    pub fn validate(self) -> Result<ValidatedCategory, EstoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        Ok(ValidatedCategory {
            name: name.to_string(),
            description: non_blank(self.description),
            image_url: non_blank(self.image_url),
            parent_id: self.parent_category_id,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Short form of a category, used for parents and children in a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            image_url: category.image_url.clone(),
        }
    }
}

/// A category with its parent and direct children resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    pub parent_category: Option<CategorySummary>,
    pub sub_categories: Vec<CategorySummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            ..CategoryDraft::default()
        }
    }

    #[test]
    fn should_start_active_with_trimmed_name() {
        let category = Category::from_draft(draft("  Laptops ").validate().unwrap());
        assert_eq!(category.name, "Laptops");
        assert_eq!(category.status, CategoryStatus::Active);
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn should_reject_blank_name() {
        assert!(matches!(
            draft(" ").validate(),
            Err(EstoreError::Validation(ValidationError::EmptyField("name")))
        ));
    }

    #[test]
    fn should_keep_image_and_clear_parent_when_update_omits_them() {
        let parent = CategoryId::new();
        let mut category = Category::from_draft(
            CategoryDraft {
                name: "Phones".to_string(),
                image_url: Some("/img/phones.png".to_string()),
                parent_category_id: Some(parent),
                ..CategoryDraft::default()
            }
            .validate()
            .unwrap(),
        );

        category.apply(draft("Smartphones").validate().unwrap());

        assert_eq!(category.name, "Smartphones");
        assert_eq!(category.image_url.as_deref(), Some("/img/phones.png"));
        assert_eq!(category.parent_id, None);
    }

    #[test]
    fn should_read_parent_from_request_field() {
        let parent = CategoryId::new();
        let json = format!(r#"{{"name":"Tablets","parent_category_id":"{parent}"}}"#);
        let d: CategoryDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(d.validate().unwrap().parent_id, Some(parent));
    }

    #[test]
    fn should_flatten_category_fields_into_view() {
        let category = Category::from_draft(draft("Audio").validate().unwrap());
        let view = CategoryView {
            category: category.clone(),
            parent_category: None,
            sub_categories: vec![],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Audio");
        assert_eq!(json["status"], "ACTIVE");
        assert!(json["parent_category"].is_null());
    }
}
