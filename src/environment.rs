//! Environment frames: a chain of name → value maps, one per active scope.
//!
//! Frames are shared (`Rc<RefCell<_>>`) because a closure keeps its defining
//! frame — and transitively the whole chain — alive after the block that
//! created it exits. A frame is freed only when the last closure or call
//! frame referencing it is gone.
//!
//! `get`/`assign` walk the chain outward and fail with "Undefined variable"
//! at the end. `get_at`/`assign_at` jump straight to the frame `distance`
//! hops out, trusting the resolver; a mismatch there is a broken internal
//! invariant, not a user-facing error.

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Insert into this frame. Overwriting is permitted: parameter binding
    /// and top-level re-declaration rely on it. Duplicate checks belong to
    /// the resolver and apply only within a single static block.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    /// Look `name` up in this frame, then outward along the chain.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(name.lexeme.as_str()) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(LoxError::runtime(
                name,
                format!("Undefined variable '{}'", name.lexeme),
            ))
        }
    }

    /// Assign to an existing binding in this frame or an enclosing one.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if self.values.contains_key(name.lexeme.as_str()) {
            self.values.insert(name.lexeme.clone(), value);
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(LoxError::runtime(
                name,
                format!("Undefined variable '{}'", name.lexeme),
            ))
        }
    }

    /// Read the binding exactly `distance` frames out. No search: the
    /// resolver proved the name lives there.
    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Value {
        Self::ancestor(env, distance)
            .borrow()
            .values
            .get(name)
            .cloned()
            .expect("resolved local missing from its environment frame")
    }

    /// Write the binding exactly `distance` frames out.
    pub fn assign_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str, value: Value) {
        Self::ancestor(env, distance)
            .borrow_mut()
            .values
            .insert(name.to_owned(), value);
    }

    fn ancestor(env: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
        let mut frame: Rc<RefCell<Environment>> = Rc::clone(env);

        for _ in 0..distance {
            let next: Rc<RefCell<Environment>> = frame
                .borrow()
                .enclosing
                .clone()
                .expect("resolver distance exceeds environment depth");

            frame = next;
        }

        frame
    }
}
