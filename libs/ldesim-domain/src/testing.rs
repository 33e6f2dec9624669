//! Test doubles shared by the unit tests

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::fragment::{Fragment, LocalPath, Result};
use crate::storage::FragmentRepository;

// In-memory storage for testing
#[derive(Clone, Default)]
pub(crate) struct InMemoryStorage {
    data: Arc<Mutex<BTreeMap<LocalPath, Fragment>>>,
}

impl FragmentRepository for InMemoryStorage {
    fn save(&self, fragment: Fragment) -> impl Future<Output = Result<()>> + Send {
        let data = self.data.clone();
        async move {
            data.lock().unwrap().insert(fragment.id.clone(), fragment);
            Ok(())
        }
    }

    fn get(&self, id: &LocalPath) -> impl Future<Output = Result<Option<Fragment>>> + Send {
        let found = self.data.lock().unwrap().get(id).cloned();
        async move { Ok(found) }
    }

    fn keys(&self) -> impl Future<Output = Result<Vec<LocalPath>>> + Send {
        let keys = self.data.lock().unwrap().keys().cloned().collect();
        async move { Ok(keys) }
    }

    fn remove_all(&self) -> impl Future<Output = Result<usize>> + Send {
        let data = self.data.clone();
        async move {
            let mut data = data.lock().unwrap();
            let count = data.len();
            data.clear();
            Ok(count)
        }
    }
}
