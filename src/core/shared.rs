// Shared Tree
// Lock-guarded handle for touching widget options from outside the draw loop

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::config_dict::ConfigDict;
use super::error::TreeError;
use super::tree::{WidgetId, WidgetTree};

/// Widget tree shared between the draw loop and other threads
///
/// Configuration reads and writes take the lock for their whole duration.
/// The draw loop holds the lock for a full frame.
#[derive(Debug, Clone, Default)]
pub struct SharedTree(Arc<Mutex<WidgetTree>>);

impl SharedTree {
    pub fn new(tree: WidgetTree) -> Self {
        Self(Arc::new(Mutex::new(tree)))
    }

    /// Lock the tree, recovering from a poisoned lock
    pub fn lock(&self) -> MutexGuard<'_, WidgetTree> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply kind-specific options under the lock; a missing dictionary is a no-op
    pub fn set_extra_config(&self, id: WidgetId, dict: Option<&ConfigDict>) -> Result<(), TreeError> {
        let Some(dict) = dict else {
            return Ok(());
        };
        self.lock().set_extra_config(id, Some(dict))
    }

    /// Read kind-specific options under the lock; a missing dictionary is a no-op
    pub fn get_extra_config(&self, id: WidgetId, dict: Option<&mut ConfigDict>) -> Result<(), TreeError> {
        let Some(dict) = dict else {
            return Ok(());
        };
        self.lock().get_extra_config(id, Some(dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_dict::{get_bool, set_bool};
    use std::thread;

    #[test]
    fn test_config_from_another_thread() {
        let mut tree = WidgetTree::new();
        let bar = tree.add_tab_bar(None, "bar").unwrap();
        let tab = tree.add_tab(bar, "a").unwrap();
        let shared = SharedTree::new(tree);

        let worker = shared.clone();
        thread::spawn(move || {
            let mut dict = ConfigDict::new();
            set_bool(&mut dict, "closable", true);
            worker.set_extra_config(tab, Some(&dict)).unwrap();
        })
        .join()
        .unwrap();

        let mut out = ConfigDict::new();
        shared.get_extra_config(tab, Some(&mut out)).unwrap();
        assert_eq!(get_bool(&out, "closable"), Some(true));
        assert!(shared.lock().tab(tab).unwrap().closable);
    }

    #[test]
    fn test_missing_dict_skips_lookup() {
        let shared = SharedTree::default();
        let mut tree = WidgetTree::new();
        let stale = tree.add_tab_bar(None, "bar").unwrap();
        // No dictionary means nothing is looked up, even for a handle this tree never had
        assert!(shared.set_extra_config(stale, None).is_ok());
        assert!(shared.get_extra_config(stale, None).is_ok());
    }
}
