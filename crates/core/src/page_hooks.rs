//! Hooks run synchronously while a new page is being initialised under a
//! parent, before it is written to the tree.

use std::sync::Arc;

use crate::types::DbId;

/// Language-related view of a page, shared by stored pages and drafts.
pub trait LanguageNode {
    /// `true` for translatable pages (those that carry a language).
    fn is_translatable(&self) -> bool;
    fn language_id(&self) -> Option<DbId>;
}

/// A draft page whose language can still be changed.
pub trait LanguageNodeMut: LanguageNode {
    fn set_language_id(&mut self, language_id: DbId);
}

/// Called with `(parent, new_page)` for every page created below a parent.
pub trait PageInitHook: Send + Sync {
    fn name(&self) -> &'static str;
    fn init_new_page(&self, parent: &dyn LanguageNode, page: &mut dyn LanguageNodeMut);
}

/// Ordered set of hooks dispatched by the page-creation workflow.
#[derive(Clone, Default)]
pub struct PageInitHooks {
    hooks: Vec<Arc<dyn PageInitHook>>,
}

impl PageInitHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the hooks every deployment needs.
    pub fn standard() -> Self {
        let mut hooks = Self::new();
        hooks.register(Arc::new(InheritLanguageFromParent));
        hooks
    }

    pub fn register(&mut self, hook: Arc<dyn PageInitHook>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook in registration order.
    pub fn dispatch(&self, parent: &dyn LanguageNode, page: &mut dyn LanguageNodeMut) {
        for hook in &self.hooks {
            tracing::debug!(hook = hook.name(), "Running page init hook");
            hook.init_new_page(parent, page);
        }
    }
}

/// New translatable pages start out in their translatable parent's language.
pub struct InheritLanguageFromParent;

impl PageInitHook for InheritLanguageFromParent {
    fn name(&self) -> &'static str {
        "inherit_language_from_parent"
    }

    fn init_new_page(&self, parent: &dyn LanguageNode, page: &mut dyn LanguageNodeMut) {
        if !(parent.is_translatable() && page.is_translatable()) {
            return;
        }
        if let Some(language_id) = parent.language_id() {
            page.set_language_id(language_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        translatable: bool,
        language_id: Option<DbId>,
    }

    impl LanguageNode for Node {
        fn is_translatable(&self) -> bool {
            self.translatable
        }
        fn language_id(&self) -> Option<DbId> {
            self.language_id
        }
    }

    impl LanguageNodeMut for Node {
        fn set_language_id(&mut self, language_id: DbId) {
            self.language_id = Some(language_id);
        }
    }

    fn node(translatable: bool, language_id: Option<DbId>) -> Node {
        Node {
            translatable,
            language_id,
        }
    }

    #[test]
    fn test_child_inherits_parent_language() {
        let parent = node(true, Some(7));
        let mut child = node(true, None);
        PageInitHooks::standard().dispatch(&parent, &mut child);
        assert_eq!(child.language_id, Some(7));
    }

    #[test]
    fn test_parent_language_overrides_preset_language() {
        let parent = node(true, Some(7));
        let mut child = node(true, Some(3));
        PageInitHooks::standard().dispatch(&parent, &mut child);
        assert_eq!(child.language_id, Some(7));
    }

    #[test]
    fn test_untranslatable_parent_leaves_child_alone() {
        let parent = node(false, None);
        let mut child = node(true, Some(3));
        PageInitHooks::standard().dispatch(&parent, &mut child);
        assert_eq!(child.language_id, Some(3));
    }

    #[test]
    fn test_untranslatable_child_is_skipped() {
        let parent = node(true, Some(7));
        let mut child = node(false, None);
        PageInitHooks::standard().dispatch(&parent, &mut child);
        assert_eq!(child.language_id, None);
    }

    #[test]
    fn test_hooks_run_in_registration_order() {
        struct Force(DbId);
        impl PageInitHook for Force {
            fn name(&self) -> &'static str {
                "force"
            }
            fn init_new_page(&self, _parent: &dyn LanguageNode, page: &mut dyn LanguageNodeMut) {
                page.set_language_id(self.0);
            }
        }

        let mut hooks = PageInitHooks::standard();
        hooks.register(Arc::new(Force(99)));
        assert_eq!(hooks.len(), 2);

        let parent = node(true, Some(7));
        let mut child = node(true, None);
        hooks.dispatch(&parent, &mut child);
        assert_eq!(child.language_id, Some(99));
    }

    #[test]
    fn test_empty_registry_is_noop() {
        let hooks = PageInitHooks::new();
        assert!(hooks.is_empty());
        let parent = node(true, Some(7));
        let mut child = node(true, None);
        hooks.dispatch(&parent, &mut child);
        assert_eq!(child.language_id, None);
    }
}
