use std::{
    fmt::Debug,
    sync::atomic::{AtomicBool, Ordering},
};

pub trait Debugger: Debug {
    fn is_on(&self) -> bool;
    fn print(&self, info: &str);
    fn turn_on(&self);
    fn turn_off(&self);
    fn reset(&self, is_on: bool);
}

/// Prints to standard output.
#[derive(Debug, Default)]
pub struct ConsoleDebugger {
    is_on: AtomicBool,
}

impl ConsoleDebugger {
    pub fn new(is_on: bool) -> Self {
        Self {
            is_on: AtomicBool::new(is_on),
        }
    }
}

impl Debugger for ConsoleDebugger {
    fn is_on(&self) -> bool {
        self.is_on.load(Ordering::SeqCst)
    }

    fn print(&self, info: &str) {
        println!("{}", info);
    }

    fn turn_on(&self) {
        self.is_on.store(true, Ordering::SeqCst);
    }

    fn turn_off(&self) {
        self.is_on.store(false, Ordering::SeqCst);
    }

    fn reset(&self, is_on: bool) {
        self.is_on.store(is_on, Ordering::SeqCst);
    }
}
