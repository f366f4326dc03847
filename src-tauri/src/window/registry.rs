use std::collections::HashMap;

use super::WindowRole;
use crate::error::Result;

/// A live native window as seen by the registry.
pub trait WindowHandle: Clone {
    fn focus(&self) -> Result<()>;
    fn close(&self) -> Result<()>;
}

/// Role-keyed table of live windows, at most one per role.
#[derive(Debug)]
pub struct WindowRegistry<H> {
    windows: HashMap<WindowRole, H>,
}

impl<H: WindowHandle> WindowRegistry<H> {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }

    pub fn is_main(role: WindowRole) -> bool {
        role.is_main()
    }

    /// Focuses and returns the live window for `role`, or builds one with `factory`
    /// and registers it. The factory is not called when a window already exists.
    pub fn open<F>(&mut self, role: WindowRole, factory: F) -> Result<H>
    where
        F: FnOnce() -> Result<H>,
    {
        if let Some(existing) = self.windows.get(&role) {
            tracing::debug!("Window {} already open, focusing", role.label());
            if let Err(e) = existing.focus() {
                tracing::warn!("Failed to focus {} window: {}", role.label(), e);
            }
            return Ok(existing.clone());
        }

        let handle = factory()?;
        tracing::info!("Opened {} window", role.label());
        self.windows.insert(role, handle.clone());
        Ok(handle)
    }

    pub fn get(&self, role: WindowRole) -> Option<&H> {
        self.windows.get(&role)
    }

    /// Called from the window's close event.
    pub fn on_closed(&mut self, role: WindowRole) -> Option<H> {
        let removed = self.windows.remove(&role);
        if removed.is_some() {
            tracing::debug!("Window {} closed", role.label());
        }
        removed
    }

    /// Closes every auxiliary window. Roles without a window are skipped.
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        for role in WindowRole::auxiliary() {
            let Some(handle) = self.windows.remove(&role) else {
                continue;
            };
            if let Err(e) = handle.close() {
                tracing::warn!("Failed to close {} window: {}", role.label(), e);
            }
            closed += 1;
        }
        closed
    }

    pub fn live_count(&self) -> usize {
        self.windows.len()
    }

    pub fn live(&self) -> impl Iterator<Item = (WindowRole, &H)> {
        self.windows.iter().map(|(role, handle)| (*role, handle))
    }
}

impl<H: WindowHandle> Default for WindowRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Log {
        focused: Vec<u32>,
        closed: Vec<u32>,
    }

    #[derive(Debug, Clone)]
    struct FakeWindow {
        id: u32,
        log: Rc<RefCell<Log>>,
    }

    impl WindowHandle for FakeWindow {
        fn focus(&self) -> Result<()> {
            self.log.borrow_mut().focused.push(self.id);
            Ok(())
        }

        fn close(&self) -> Result<()> {
            self.log.borrow_mut().closed.push(self.id);
            Ok(())
        }
    }

    fn window(id: u32, log: &Rc<RefCell<Log>>) -> FakeWindow {
        FakeWindow {
            id,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn open_twice_builds_once_and_focuses_existing() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut registry = WindowRegistry::new();
        let mut built = 0;

        let first = registry
            .open(WindowRole::Wiki, || {
                built += 1;
                Ok(window(1, &log))
            })
            .unwrap();
        let second = registry
            .open(WindowRole::Wiki, || {
                built += 1;
                Ok(window(2, &log))
            })
            .unwrap();

        assert_eq!(built, 1);
        assert_eq!(first.id, second.id);
        assert_eq!(log.borrow().focused, vec![1]);
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn reopen_after_close_builds_a_new_window() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut registry = WindowRegistry::new();

        registry
            .open(WindowRole::Pokedex, || Ok(window(1, &log)))
            .unwrap();
        assert!(registry.on_closed(WindowRole::Pokedex).is_some());
        assert!(registry.on_closed(WindowRole::Pokedex).is_none());

        let reopened = registry
            .open(WindowRole::Pokedex, || Ok(window(2, &log)))
            .unwrap();
        assert_eq!(reopened.id, 2);
    }

    #[test]
    fn failed_factory_registers_nothing() {
        let mut registry: WindowRegistry<FakeWindow> = WindowRegistry::new();
        let result = registry.open(WindowRole::Smogon, || {
            Err(ShellError::Window("no display".to_string()))
        });
        assert!(result.is_err());
        assert!(registry.get(WindowRole::Smogon).is_none());
    }

    #[test]
    fn close_all_closes_auxiliary_windows_only() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut registry = WindowRegistry::new();
        registry
            .open(WindowRole::Main, || Ok(window(0, &log)))
            .unwrap();
        registry
            .open(WindowRole::Wiki, || Ok(window(1, &log)))
            .unwrap();
        registry
            .open(WindowRole::TypeChart, || Ok(window(2, &log)))
            .unwrap();

        assert_eq!(registry.close_all(), 2);
        assert_eq!(registry.close_all(), 0);

        let mut closed = log.borrow().closed.clone();
        closed.sort();
        assert_eq!(closed, vec![1, 2]);
        assert_eq!(registry.live_count(), 1);
        assert!(registry.get(WindowRole::Main).is_some());
    }

    #[test]
    fn only_main_is_main() {
        assert!(WindowRegistry::<FakeWindow>::is_main(WindowRole::Main));
        assert!(WindowRole::auxiliary().all(|role| !WindowRegistry::<FakeWindow>::is_main(role)));
    }
}
