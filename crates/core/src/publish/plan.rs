use crate::draft::CourseDraft;

/// One create request in a publish run.
///
/// Indices are 0-based positions in the draft at the time the plan was
/// built; [`Display`](std::fmt::Display) renders them 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishTask {
    CreateCourse,
    CreateModule { module: usize },
    CreateLesson { module: usize, lesson: usize },
    CreateAssignment { assignment: usize },
}

impl std::fmt::Display for PublishTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateCourse => f.write_str("course"),
            Self::CreateModule { module } => write!(f, "module {}", module + 1),
            Self::CreateLesson { module, lesson } => {
                write!(f, "module {} lesson {}", module + 1, lesson + 1)
            }
            Self::CreateAssignment { assignment } => write!(f, "assignment {}", assignment + 1),
        }
    }
}

/// The ordered create requests needed to persist a draft.
///
/// Order: the course, then for each module the module followed by its
/// lessons, then every assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    tasks: Vec<PublishTask>,
}

impl PublishPlan {
    pub fn from_draft(draft: &CourseDraft) -> Self {
        let lesson_count: usize = draft.modules().iter().map(|m| m.lessons().len()).sum();
        let mut tasks =
            Vec::with_capacity(1 + draft.modules().len() + lesson_count + draft.assignments().len());

        tasks.push(PublishTask::CreateCourse);
        for (module, draft_module) in draft.modules().iter().enumerate() {
            tasks.push(PublishTask::CreateModule { module });
            tasks.extend(
                (0..draft_module.lessons().len())
                    .map(|lesson| PublishTask::CreateLesson { module, lesson }),
            );
        }
        tasks.extend(
            (0..draft.assignments().len())
                .map(|assignment| PublishTask::CreateAssignment { assignment }),
        );

        Self { tasks }
    }

    pub fn tasks(&self) -> &[PublishTask] {
        &self.tasks
    }

    /// Number of requests a fully successful run issues.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always false: a plan contains at least the course request.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PublishTask> + '_ {
        self.tasks.iter().copied()
    }
}
