//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod background_template;
pub mod content_entry;
pub mod exam_paper;
pub mod exam_paper_subject;
pub mod question;

// Re-export specific types to avoid conflicts
pub use background_template::{
    Column as BackgroundTemplateColumn, Entity as BackgroundTemplate,
    Model as BackgroundTemplateModel, TemplateType,
};
pub use content_entry::{
    Column as ContentEntryColumn, Entity as ContentEntry, Model as ContentEntryModel,
};
pub use exam_paper::{
    Column as ExamPaperColumn, Entity as ExamPaper, Model as ExamPaperModel, PaperStatus,
};
pub use exam_paper_subject::{
    Column as ExamPaperSubjectColumn, Entity as ExamPaperSubject, Model as ExamPaperSubjectModel,
};
pub use question::{AnswerOption, Column as QuestionColumn, Entity as Question, Model as QuestionModel};
