mod answer_question;
mod chat_widget;

pub use answer_question::*;
pub use chat_widget::*;
