//! Entity schema registry.
//!
//! Declares, per collection, the primary key and the secondary indexes the
//! store maintains. The registry is consulted when the schema is created and
//! when an indexed read is requested; ordinary reads never look at it.

use std::fmt;
use std::str::FromStr;

/// Version of the on-disk layout. Stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Every named collection in the workspace store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Boards,
    Columns,
    Cards,
    Projects,
    Notes,
    Docs,
    Labels,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Boards,
        Collection::Columns,
        Collection::Cards,
        Collection::Projects,
        Collection::Notes,
        Collection::Docs,
        Collection::Labels,
    ];

    /// Collection (and table) name.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Boards => "boards",
            Collection::Columns => "columns",
            Collection::Cards => "cards",
            Collection::Projects => "projects",
            Collection::Notes => "notes",
            Collection::Docs => "docs",
            Collection::Labels => "labels",
        }
    }

    pub fn schema(self) -> &'static CollectionSchema {
        // REGISTRY is declared in the same order as Collection::ALL
        &REGISTRY[self as usize]
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("Unknown collection: {}", s))
    }
}

/// Secondary index keys. Each maps to a top-level field of the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    BoardId,
    ColumnId,
}

impl Index {
    pub fn key_path(self) -> &'static str {
        match self {
            Index::BoardId => "boardId",
            Index::ColumnId => "columnId",
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_path())
    }
}

/// A secondary index declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub index: Index,
    pub unique: bool,
}

/// Primary key and indexes of one collection.
#[derive(Debug)]
pub struct CollectionSchema {
    pub collection: Collection,
    pub key_path: &'static str,
    pub indexes: &'static [IndexSpec],
}

const BY_BOARD: IndexSpec = IndexSpec {
    index: Index::BoardId,
    unique: false,
};

const BY_COLUMN: IndexSpec = IndexSpec {
    index: Index::ColumnId,
    unique: false,
};

/// The full registry, in `Collection::ALL` order.
pub static REGISTRY: [CollectionSchema; 7] = [
    CollectionSchema {
        collection: Collection::Boards,
        key_path: "id",
        indexes: &[],
    },
    CollectionSchema {
        collection: Collection::Columns,
        key_path: "id",
        indexes: &[BY_BOARD],
    },
    CollectionSchema {
        collection: Collection::Cards,
        key_path: "id",
        indexes: &[BY_BOARD, BY_COLUMN],
    },
    CollectionSchema {
        collection: Collection::Projects,
        key_path: "id",
        indexes: &[BY_BOARD],
    },
    CollectionSchema {
        collection: Collection::Notes,
        key_path: "id",
        indexes: &[],
    },
    CollectionSchema {
        collection: Collection::Docs,
        key_path: "id",
        indexes: &[],
    },
    CollectionSchema {
        collection: Collection::Labels,
        key_path: "id",
        indexes: &[],
    },
];

impl CollectionSchema {
    pub fn has_index(&self, index: Index) -> bool {
        self.indexes.iter().any(|spec| spec.index == index)
    }

    /// Name of the SQL index backing `index` on this collection.
    pub fn index_name(&self, index: Index) -> String {
        format!("{}_by_{}", self.collection.name(), index.key_path())
    }

    /// Statements that create the table and its indexes. Safe to re-run.
    pub fn ddl(&self) -> Vec<String> {
        let table = self.collection.name();
        let mut statements = vec![format!(
            "CREATE TABLE IF NOT EXISTS {table} (\
             {key} TEXT PRIMARY KEY NOT NULL, \
             data TEXT NOT NULL CHECK (json_valid(data)))",
            key = self.key_path,
        )];

        for spec in self.indexes {
            let kind = if spec.unique { "UNIQUE INDEX" } else { "INDEX" };
            statements.push(format!(
                "CREATE {kind} IF NOT EXISTS {name} ON {table} ({expr})",
                name = self.index_name(spec.index),
                expr = index_expr(spec.index),
            ));
        }

        statements
    }
}

/// SQL expression extracting the indexed field from a stored document.
///
/// Indexed reads must use this exact text for SQLite to pick the expression
/// index.
pub fn index_expr(index: Index) -> String {
    format!("json_extract(data, '$.{}')", index.key_path())
}
