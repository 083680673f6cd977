use std::borrow::Cow;

#[shop_derive::shop_error]
pub enum DatabaseError {
    /// Connection settings are incomplete or malformed.
    #[error("Invalid database settings{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database unreachable{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database sign-in rejected{}: {message}", format_context(.context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Query failed{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// A script failed, or an applied script was edited afterwards.
    #[error("Migration failed{}: {message}", format_context(.context))]
    Migration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
