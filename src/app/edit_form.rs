use crate::app::constants::{KEY_CHAR_LIMIT, NAME_CHAR_LIMIT, TAGS_CHAR_LIMIT};
use crate::model::{Connection, EditTarget, Field};

#[derive(Debug, Clone)]
pub(crate) struct TextInput {
    pub(crate) value: String,
    pub(crate) limit: usize,
    pub(crate) focused: bool,
}

impl TextInput {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            value: String::new(),
            limit,
            focused: false,
        }
    }

    pub(crate) fn insert(&mut self, ch: char) {
        if self.value.chars().count() < self.limit {
            self.value.push(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(self.limit).collect();
    }
}

/// Buffer behind the add/edit modal.
#[derive(Debug, Clone)]
pub(crate) struct EditForm {
    pub(crate) name: TextInput,
    pub(crate) key: TextInput,
    pub(crate) tags: TextInput,
    pub(crate) focus: Field,
    pub(crate) target: Option<EditTarget>,
}

impl Default for EditForm {
    fn default() -> Self {
        Self {
            name: TextInput::new(NAME_CHAR_LIMIT),
            key: TextInput::new(KEY_CHAR_LIMIT),
            tags: TextInput::new(TAGS_CHAR_LIMIT),
            focus: Field::Name,
            target: None,
        }
    }
}

impl EditForm {
    pub(crate) fn for_new() -> Self {
        let mut form = Self {
            target: Some(EditTarget::New),
            ..Self::default()
        };
        form.focus_field(Field::Name);
        form
    }

    pub(crate) fn for_existing(index: usize, conn: &Connection) -> Self {
        let mut form = Self {
            target: Some(EditTarget::Existing(index)),
            ..Self::default()
        };
        form.name.set_value(&conn.name);
        form.key.set_value(&conn.key);
        form.tags.set_value(&conn.tags.join(", "));
        form.focus_field(Field::Name);
        form
    }

    pub(crate) fn input(&self, field: Field) -> &TextInput {
        match field {
            Field::Name => &self.name,
            Field::Key => &self.key,
            Field::Tags => &self.tags,
        }
    }

    fn input_mut(&mut self, field: Field) -> &mut TextInput {
        match field {
            Field::Name => &mut self.name,
            Field::Key => &mut self.key,
            Field::Tags => &mut self.tags,
        }
    }

    pub(crate) fn focus_field(&mut self, field: Field) {
        self.input_mut(self.focus).focused = false;
        self.focus = field;
        self.input_mut(field).focused = true;
    }

    pub(crate) fn cycle_focus(&mut self, forward: bool) {
        let fields = Field::ORDER;
        let pos = fields
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else if pos == 0 {
            fields.len() - 1
        } else {
            pos - 1
        };
        self.focus_field(fields[next]);
    }

    pub(crate) fn insert(&mut self, ch: char) {
        self.input_mut(self.focus).insert(ch);
    }

    pub(crate) fn backspace(&mut self) {
        self.input_mut(self.focus).backspace();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_forward_and_backward() {
        let mut form = EditForm::for_new();
        assert_eq!(form.focus, Field::Name);
        form.cycle_focus(true);
        assert_eq!(form.focus, Field::Key);
        form.cycle_focus(true);
        assert_eq!(form.focus, Field::Tags);
        form.cycle_focus(true);
        assert_eq!(form.focus, Field::Name);
        form.cycle_focus(false);
        assert_eq!(form.focus, Field::Tags);
    }

    #[test]
    fn only_focused_input_is_marked() {
        let mut form = EditForm::for_new();
        form.cycle_focus(true);
        assert!(!form.name.focused);
        assert!(form.key.focused);
        assert!(!form.tags.focused);
    }

    #[test]
    fn inputs_respect_char_limits() {
        let mut form = EditForm::for_new();
        for _ in 0..NAME_CHAR_LIMIT + 10 {
            form.insert('x');
        }
        assert_eq!(form.name.value.chars().count(), NAME_CHAR_LIMIT);
        form.backspace();
        assert_eq!(form.name.value.chars().count(), NAME_CHAR_LIMIT - 1);
    }

    #[test]
    fn existing_prefills_fields() {
        let conn = Connection::new("Echo", "abc123", vec!["work".into(), "lab".into()]);
        let form = EditForm::for_existing(4, &conn);
        assert_eq!(form.target, Some(EditTarget::Existing(4)));
        assert_eq!(form.name.value, "Echo");
        assert_eq!(form.key.value, "abc123");
        assert_eq!(form.tags.value, "work, lab");
        assert!(form.name.focused);
    }
}
