//! Default bootstrap script offered as the starting schema.

/// Two related tables with seed data.
///
/// `cliente.empresa_id` references `empresa.id`. Client 1 has every column
/// filled, client 2 is missing `email` and client 3 only has `id` and
/// `email`, which makes the script a handy fixture for sample-row ranking.
pub const DEFAULT_SCHEMA_SQL: &str = r#"DROP TABLE IF EXISTS cliente;
DROP TABLE IF EXISTS empresa;

CREATE TABLE empresa (
    id INTEGER PRIMARY KEY,
    nome TEXT NOT NULL
);

CREATE TABLE cliente (
    id INTEGER PRIMARY KEY,
    nome TEXT,
    email TEXT,
    empresa_id INTEGER,
    FOREIGN KEY (empresa_id) REFERENCES empresa(id)
);

INSERT INTO empresa (id, nome) VALUES
(1, 'OpenAI'),
(2, 'Growth Inc.');

INSERT INTO cliente (id, nome, email, empresa_id) VALUES
(1, 'João Victor', 'joao@example.com', 1),
(2, 'Maria Silva', NULL, 2),
(3, NULL, 'maria@example.com', NULL);"#;
