//! Theme change notification.
//!
//! The active theme is pushed to subscribers when it changes. Nothing polls
//! storage on a timer; whoever owns the settings calls [`ThemeHub::set`]
//! and every registered listener hears about it once.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

type Listener = Box<dyn Fn(Theme) + Send + Sync>;

pub struct ThemeHub {
    current: Mutex<Theme>,
    listeners: Mutex<Vec<Listener>>,
}

impl ThemeHub {
    pub fn new(initial: Theme) -> Self {
        ThemeHub {
            current: Mutex::new(initial),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> Theme {
        *self.current.lock().unwrap()
    }

    /// Register a listener. It is called immediately with the current
    /// theme so subscribers never start out stale.
    pub fn subscribe(&self, listener: impl Fn(Theme) + Send + Sync + 'static) {
        listener(self.current());
        self.listeners.lock().unwrap().push(Box::new(listener));
    }

    /// Change the theme. Listeners are notified only on an actual change.
    pub fn set(&self, theme: Theme) {
        {
            let mut current = self.current.lock().unwrap();
            if *current == theme {
                return;
            }
            *current = theme;
        }
        for listener in self.listeners.lock().unwrap().iter() {
            listener(theme);
        }
    }
}
