/// A resolved (file, repeat-count) pair ready for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Path of the GIF to read
    pub source: String,

    /// How many times the file's full frame sequence is appended
    pub repeat_count: u32,
}

impl Task {
    pub fn new<S: Into<String>>(source: S, repeat_count: u32) -> Self {
        Self {
            source: source.into(),
            repeat_count,
        }
    }
}

/// Ordered list of tasks; output frames follow this order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create a new empty task list
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Get the total number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by position
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Get all tasks in order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Iterate over tasks in order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Total number of file passes the stitcher will append
    pub fn total_repeats(&self) -> u64 {
        self.tasks.iter().map(|t| u64::from(t.repeat_count)).sum()
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
