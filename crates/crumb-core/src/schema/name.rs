use std_util::str;

/// An identifier split into its snake_case words.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = str::snake_case(src);
        let parts = snake.split('_').map(String::from).collect();
        Self { parts }
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    /// Default table name: the plural of the snake_case name.
    pub fn table_name(&self) -> String {
        str::pluralize(&self.snake_case())
    }

    /// Default foreign key pointing at an entity with this name.
    pub fn foreign_key(&self) -> String {
        format!("{}_id", str::singularize(&self.snake_case()))
    }
}
