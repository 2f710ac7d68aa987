use crate::entities::option_fields::OptionField;

/// Canonical slug derivation. Deterministic for a given title, which the
/// fallback lookup in the content handlers depends on: lowercase, punctuation
/// stripped, separators collapsed to single hyphens, Unicode transliterated.
pub fn slugify(title: &str) -> String {
    slug::slugify(title)
}

/// True when `requested` is the derived slug of `title`.
pub fn matches_derived_slug(title: &str, requested: &str) -> bool {
    slugify(title) == requested
}

/// Slug to persist when a row is updated.
///
/// An explicitly supplied non-empty slug always wins. Otherwise a title change
/// recomputes the slug from the new title, so editing a title silently moves
/// the canonical URL unless the caller pins the slug. Callers that need old
/// links to keep working rely on the derived-slug fallback at lookup time.
pub fn resolve_slug_for_update(
    slug_field: &OptionField<String>,
    title_field: &OptionField<String>,
    current_slug: &str,
) -> String {
    match slug_field {
        OptionField::SetToValue(s) if !s.trim().is_empty() => s.clone(),

        // Explicit empty/null slug → regenerate from the new title if provided
        OptionField::SetToValue(_) | OptionField::SetToNull => {
            if let OptionField::SetToValue(new_title) = title_field {
                slugify(new_title)
            } else {
                current_slug.to_string()
            }
        }

        OptionField::Unchanged => {
            if let OptionField::SetToValue(new_title) = title_field {
                slugify(new_title)
            } else {
                current_slug.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_punctuation_and_lowercases() {
        assert_eq!(slugify("My First Post!!"), "my-first-post");
    }

    #[test]
    fn slugify_collapses_repeated_separators() {
        assert_eq!(slugify("A  --  B"), "a-b");
    }

    #[test]
    fn slugify_handles_unicode() {
        assert_eq!(slugify("Révision Générale"), "revision-generale");
    }

    #[test]
    fn slugify_is_idempotent() {
        for title in ["My First Post!!", "Crème Brûlée 101", "  spaced   out  "] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn explicit_slug_wins_over_title_change() {
        let resolved = resolve_slug_for_update(
            &OptionField::SetToValue("pinned-slug".into()),
            &OptionField::SetToValue("Completely New Title".into()),
            "old-slug",
        );
        assert_eq!(resolved, "pinned-slug");
    }

    #[test]
    fn title_only_update_recomputes_slug() {
        let resolved = resolve_slug_for_update(
            &OptionField::Unchanged,
            &OptionField::SetToValue("Completely New Title".into()),
            "old-slug",
        );
        assert_eq!(resolved, "completely-new-title");
    }

    #[test]
    fn untouched_update_keeps_current_slug() {
        let resolved = resolve_slug_for_update(
            &OptionField::Unchanged,
            &OptionField::Unchanged,
            "old-slug",
        );
        assert_eq!(resolved, "old-slug");
    }

    #[test]
    fn cleared_slug_regenerates_from_new_title() {
        let resolved = resolve_slug_for_update(
            &OptionField::SetToValue("  ".into()),
            &OptionField::SetToValue("Fresh Title".into()),
            "old-slug",
        );
        assert_eq!(resolved, "fresh-title");
    }
}
