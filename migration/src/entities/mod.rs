pub mod click;
pub mod lesson;
pub mod link;
pub mod school;

pub use click::Entity as ClickEntity;
pub use lesson::Entity as LessonEntity;
pub use link::Entity as LinkEntity;
pub use school::Entity as SchoolEntity;
