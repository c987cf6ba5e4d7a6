// File: src/app/form.rs
use std::fmt::Debug;
use std::marker::PhantomData;

/// A named input of one of the screens' forms.
pub trait Field: Copy + Eq + Debug + 'static {
    /// Every field, in tab order.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn is_secret(self) -> bool {
        false
    }
}

/// Edits a form can receive, independent of the terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum FormInput<F> {
    Char(char),
    Backspace,
    Next,
    Prev,
    Set(F, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form<F: Field> {
    values: Vec<String>,
    focus: usize,
    _fields: PhantomData<F>,
}

impl<F: Field> Default for Form<F> {
    fn default() -> Self {
        Self {
            values: vec![String::new(); F::ALL.len()],
            focus: 0,
            _fields: PhantomData,
        }
    }
}

impl<F: Field> Form<F> {
    fn index(field: F) -> usize {
        F::ALL.iter().position(|f| *f == field).unwrap_or(0)
    }

    pub fn get(&self, field: F) -> &str {
        &self.values[Self::index(field)]
    }

    pub fn set(&mut self, field: F, value: impl Into<String>) {
        self.values[Self::index(field)] = value.into();
    }

    pub fn focused(&self) -> F {
        F::ALL[self.focus]
    }

    pub fn focus(&mut self, field: F) {
        self.focus = Self::index(field);
    }

    /// First field left blank, in tab order.
    pub fn first_missing(&self) -> Option<F> {
        F::ALL
            .iter()
            .copied()
            .find(|f| self.get(*f).trim().is_empty())
    }

    pub fn apply(&mut self, input: FormInput<F>) {
        match input {
            FormInput::Char(c) => self.values[self.focus].push(c),
            FormInput::Backspace => {
                self.values[self.focus].pop();
            }
            FormInput::Next => self.focus = (self.focus + 1) % F::ALL.len(),
            FormInput::Prev => self.focus = (self.focus + F::ALL.len() - 1) % F::ALL.len(),
            FormInput::Set(field, value) => self.set(field, value),
        }
    }

    /// What to show for `field`: secrets are masked.
    pub fn display(&self, field: F) -> String {
        let value = self.get(field);
        if field.is_secret() {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }
}
