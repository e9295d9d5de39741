//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod expense;
pub mod expense_template;
pub mod family;
pub mod family_member;
pub mod income;
pub mod user;

// Re-export specific types to avoid conflicts
pub use category::{
    CategoryType, Column as CategoryColumn, Entity as Category, Model as CategoryModel,
};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use expense_template::{
    Column as ExpenseTemplateColumn, Entity as ExpenseTemplate, Model as ExpenseTemplateModel,
};
pub use family::{Column as FamilyColumn, Entity as Family, Model as FamilyModel};
pub use family_member::{
    Column as FamilyMemberColumn, Entity as FamilyMember, Model as FamilyMemberModel, Role,
};
pub use income::{Column as IncomeColumn, Entity as Income, Model as IncomeModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
