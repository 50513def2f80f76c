//! Application use cases.
//!
//! Each use case is a small struct holding shared collaborator handles and
//! exposing one `execute` method. They keep no mutable state of their own,
//! so a single [`UseCases`] instance is shared by every request.

pub mod category;
pub mod tag;
pub mod todo;
pub mod user;

use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::clock::Clock;
use crate::ids::IdGenerator;
use crate::repository::{CategoryRepository, TagRepository, TodoRepository, UserRepository};

pub use category::{
    CategoryChanges, CreateCategory, CreateCategoryInput, DeleteCategory, ListCategories,
    UpdateCategory,
};
pub use tag::{CreateTag, DeleteTag, ListTags, UpdateTag};
pub use todo::{
    CreateTodo, CreateTodoInput, DeleteTodo, DuplicateTodo, FindTodoById, ListTodos,
    TodoChanges, ToggleTodoStatus, UpdateTodo,
};
pub use user::{
    AccountPolicy, FindUserById, LoginUser, RegisterUser, RegisterUserInput, Session,
};

/// Everything the use cases depend on, built once at startup.
#[derive(Clone)]
pub struct Collaborators {
    pub users: Arc<dyn UserRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    pub policy: AccountPolicy,
}

impl Collaborators {
    /// Use one backend for all four repositories.
    pub fn with_store<S>(
        store: Arc<S>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        policy: AccountPolicy,
    ) -> Self
    where
        S: UserRepository + TodoRepository + CategoryRepository + TagRepository + 'static,
    {
        Self {
            users: store.clone(),
            todos: store.clone(),
            categories: store.clone(),
            tags: store,
            tokens,
            clock,
            ids,
            policy,
        }
    }
}

/// The wired set of use cases.
#[derive(Clone)]
pub struct UseCases {
    pub register_user: RegisterUser,
    pub login_user: LoginUser,
    pub find_user_by_id: FindUserById,

    pub create_todo: CreateTodo,
    pub list_todos: ListTodos,
    pub find_todo_by_id: FindTodoById,
    pub update_todo: UpdateTodo,
    pub toggle_todo_status: ToggleTodoStatus,
    pub duplicate_todo: DuplicateTodo,
    pub delete_todo: DeleteTodo,

    pub create_category: CreateCategory,
    pub list_categories: ListCategories,
    pub update_category: UpdateCategory,
    pub delete_category: DeleteCategory,

    pub create_tag: CreateTag,
    pub list_tags: ListTags,
    pub update_tag: UpdateTag,
    pub delete_tag: DeleteTag,
}

impl UseCases {
    pub fn new(c: Collaborators) -> Self {
        let refs = todo::References {
            categories: c.categories.clone(),
            tags: c.tags.clone(),
        };

        Self {
            register_user: RegisterUser {
                users: c.users.clone(),
                clock: c.clock.clone(),
                ids: c.ids.clone(),
                policy: c.policy,
            },
            login_user: LoginUser {
                users: c.users.clone(),
                tokens: c.tokens.clone(),
                clock: c.clock.clone(),
                policy: c.policy,
            },
            find_user_by_id: FindUserById {
                users: c.users.clone(),
            },

            create_todo: CreateTodo {
                todos: c.todos.clone(),
                refs: refs.clone(),
                clock: c.clock.clone(),
                ids: c.ids.clone(),
            },
            list_todos: ListTodos {
                todos: c.todos.clone(),
            },
            find_todo_by_id: FindTodoById {
                todos: c.todos.clone(),
            },
            update_todo: UpdateTodo {
                todos: c.todos.clone(),
                refs,
                clock: c.clock.clone(),
            },
            toggle_todo_status: ToggleTodoStatus {
                todos: c.todos.clone(),
                clock: c.clock.clone(),
            },
            duplicate_todo: DuplicateTodo {
                todos: c.todos.clone(),
                clock: c.clock.clone(),
                ids: c.ids.clone(),
            },
            delete_todo: DeleteTodo {
                todos: c.todos.clone(),
            },

            create_category: CreateCategory {
                categories: c.categories.clone(),
                clock: c.clock.clone(),
                ids: c.ids.clone(),
            },
            list_categories: ListCategories {
                categories: c.categories.clone(),
            },
            update_category: UpdateCategory {
                categories: c.categories.clone(),
                clock: c.clock.clone(),
            },
            delete_category: DeleteCategory {
                categories: c.categories.clone(),
            },

            create_tag: CreateTag {
                tags: c.tags.clone(),
                clock: c.clock.clone(),
                ids: c.ids.clone(),
            },
            list_tags: ListTags {
                tags: c.tags.clone(),
            },
            update_tag: UpdateTag {
                tags: c.tags.clone(),
                clock: c.clock.clone(),
            },
            delete_tag: DeleteTag { tags: c.tags },
        }
    }
}
