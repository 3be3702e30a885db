//! Classes and instances.
//!
//! A class is an immutable method table plus an optional superclass link;
//! calling it constructs an instance. Method lookup walks the superclass
//! chain at call time. Instances hold mutable per-object fields; on
//! property access, fields shadow methods of the same name.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::callable::{Callable, Function};
use crate::error::{LoxError, Result};
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

#[derive(Debug)]
pub struct LoxClass {
    name: String,
    superclass: Option<Rc<LoxClass>>,
    methods: HashMap<String, Function>,
}

impl LoxClass {
    pub fn new(
        name: String,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Function>,
    ) -> Self {
        LoxClass {
            name,
            superclass,
            methods,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclass(&self) -> Option<&Rc<LoxClass>> {
        self.superclass.as_ref()
    }

    /// Look `name` up here, then up the superclass chain. Overrides win
    /// because the subclass table is consulted first.
    pub fn find_method(&self, name: &str) -> Option<&Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method);
        }

        if let Some(superclass) = &self.superclass {
            return superclass.find_method(name);
        }

        None
    }
}

impl Callable for Rc<LoxClass> {
    /// A class's arity is its initializer's arity, or zero without one.
    fn arity(&self) -> usize {
        self.find_method("init").map_or(0, Callable::arity)
    }

    /// Construct a fresh instance. If an `init` method exists it runs,
    /// bound to the new instance; either way the call yields the instance.
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        debug!("Instantiating class '{}'", self.name);

        let instance: Rc<RefCell<Instance>> =
            Rc::new(RefCell::new(Instance::new(Rc::clone(self))));

        if let Some(initializer) = self.find_method("init") {
            initializer
                .bind(Rc::clone(&instance))
                .call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl fmt::Display for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug)]
pub struct Instance {
    class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl Instance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Instance {
            class,
            fields: HashMap::new(),
        }
    }

    /// Property read: fields first, then methods (bound to this instance),
    /// otherwise a runtime error. Takes the shared handle rather than
    /// `&self` because binding a method needs to store the handle.
    pub fn get(instance: &Rc<RefCell<Instance>>, name: &Token) -> Result<Value> {
        if let Some(value) = instance.borrow().fields.get(name.lexeme.as_str()) {
            return Ok(value.clone());
        }

        if let Some(method) = instance.borrow().class.find_method(&name.lexeme) {
            let bound: Function = method.bind(Rc::clone(instance));
            return Ok(Value::Function(Rc::new(bound)));
        }

        Err(LoxError::runtime(
            name,
            format!("Undefined property '{}'", name.lexeme),
        ))
    }

    /// Property write: creates the field if absent. Never consults methods.
    pub fn set(&mut self, name: &Token, value: Value) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::FunctionDecl;
    use crate::environment::Environment;
    use crate::token::TokenType;

    fn method(name: &str) -> Function {
        let decl = Rc::new(FunctionDecl {
            name: Token::new(TokenType::IDENTIFIER, name, 1),
            params: Vec::new(),
            body: Vec::new(),
        });
        let closure = Rc::new(RefCell::new(Environment::new()));
        Function::new(decl, closure, false)
    }

    #[test]
    fn find_method_prefers_own_table() {
        let mut base_methods = HashMap::new();
        base_methods.insert("speak".to_owned(), method("speak"));
        let base = Rc::new(LoxClass::new("Base".to_owned(), None, base_methods));

        let mut derived_methods = HashMap::new();
        derived_methods.insert("speak".to_owned(), method("speak"));
        let derived = LoxClass::new(
            "Derived".to_owned(),
            Some(Rc::clone(&base)),
            derived_methods,
        );

        let found = derived.find_method("speak").unwrap();
        let own = derived.methods.get("speak").unwrap();
        assert!(std::ptr::eq(found, own), "override must shadow the base method");
    }

    #[test]
    fn find_method_walks_superclass_chain() {
        let mut base_methods = HashMap::new();
        base_methods.insert("speak".to_owned(), method("speak"));
        let base = Rc::new(LoxClass::new("Base".to_owned(), None, base_methods));

        let derived = LoxClass::new("Derived".to_owned(), Some(base), HashMap::new());

        assert!(derived.find_method("speak").is_some());
        assert!(derived.find_method("missing").is_none());
    }

    #[test]
    fn superclass_accessor_reflects_declaration() {
        let base = Rc::new(LoxClass::new("Base".to_owned(), None, HashMap::new()));
        assert!(base.superclass().is_none());

        let derived = LoxClass::new(
            "Derived".to_owned(),
            Some(Rc::clone(&base)),
            HashMap::new(),
        );
        assert!(derived.superclass().is_some_and(|s| Rc::ptr_eq(s, &base)));
    }

    #[test]
    fn field_shadows_method_on_get() {
        let mut methods = HashMap::new();
        methods.insert("x".to_owned(), method("x"));
        let class = Rc::new(LoxClass::new("Thing".to_owned(), None, methods));

        let instance = Rc::new(RefCell::new(Instance::new(class)));
        let name = Token::new(TokenType::IDENTIFIER, "x", 1);

        instance.borrow_mut().set(&name, Value::Number(7.0));

        assert_eq!(Instance::get(&instance, &name).unwrap(), Value::Number(7.0));
    }

    #[test]
    fn undefined_property_is_a_runtime_error() {
        let class = Rc::new(LoxClass::new("Thing".to_owned(), None, HashMap::new()));
        let instance = Rc::new(RefCell::new(Instance::new(class)));
        let name = Token::new(TokenType::IDENTIFIER, "missing", 1);

        let err = Instance::get(&instance, &name).unwrap_err();
        assert!(err.to_string().contains("Undefined property 'missing'"));
    }
}
