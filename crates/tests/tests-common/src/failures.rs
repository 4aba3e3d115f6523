//! Failures as PostgreSQL reports them, for exercising error translation without a server.
//!
//! Each fixture pairs a SQLSTATE with the text the driver exposes: the primary
//! message followed by the `DETAIL:` and `HINT:` lines when the server sent any.

pub struct FailureFixture {
    pub state_code: &'static str,
    pub detail_text: &'static str,
}

pub const UNIQUE_EMAIL: FailureFixture = FailureFixture {
    state_code: "23505",
    detail_text: "duplicate key value violates unique constraint \"uk_usuarios_email\"\nDETAIL:  Key (txt_email_usuario)=(joao@ex.com) already exists.",
};

pub const UNIQUE_COMPOSITE: FailureFixture = FailureFixture {
    state_code: "23505",
    detail_text: "duplicate key value violates unique constraint \"uk_grupo_usuario\"\nDETAIL:  Key (id_grupo, id_usuario)=(3, 42) already exists.",
};

pub const FOREIGN_KEY: FailureFixture = FailureFixture {
    state_code: "23503",
    detail_text: "insert or update on table \"usuarios_grupos\" violates foreign key constraint \"fk_usuarios_grupos_grupo\"\nDETAIL:  Key (id_grupo)=(99) is not present in table \"grupos\".",
};

pub const NOT_NULL: FailureFixture = FailureFixture {
    state_code: "23502",
    detail_text: "null value in column \"txt_nome_usuario\" of relation \"usuarios\" violates not-null constraint\nDETAIL:  Failing row contains (7, null, t).",
};

pub const TRUNCATION: FailureFixture = FailureFixture {
    state_code: "22001",
    detail_text: "value too long for type character varying(50)",
};

pub const SERIALIZATION: FailureFixture = FailureFixture {
    state_code: "40001",
    detail_text: "could not serialize access due to concurrent update",
};

pub const DEADLOCK: FailureFixture = FailureFixture {
    state_code: "40P01",
    detail_text: "deadlock detected\nDETAIL:  Process 4242 waits for ShareLock on transaction 1001; blocked by process 4343.",
};

pub const SYNTAX: FailureFixture = FailureFixture {
    state_code: "42601",
    detail_text: "syntax error at or near \"FROMM\"",
};

pub const UNDEFINED_COLUMN: FailureFixture = FailureFixture {
    state_code: "42703",
    detail_text: "column \"txt_apelido\" does not exist\nLINE 1: SELECT txt_apelido FROM auth.usuarios\n               ^",
};

pub const INVALID_TEXT: FailureFixture = FailureFixture {
    state_code: "22P02",
    detail_text: "invalid input syntax for type integer: \"abc\"",
};

pub const UNKNOWN: FailureFixture = FailureFixture {
    state_code: "XX000",
    detail_text: "internal error",
};

/// Every fixture, for properties that must hold across all of them.
pub const ALL: [FailureFixture; 11] = [
    UNIQUE_EMAIL,
    UNIQUE_COMPOSITE,
    FOREIGN_KEY,
    NOT_NULL,
    TRUNCATION,
    SERIALIZATION,
    DEADLOCK,
    SYNTAX,
    UNDEFINED_COLUMN,
    INVALID_TEXT,
    UNKNOWN,
];
