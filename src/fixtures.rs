#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    use crate::schema::{
        FieldMeta, LeafKind, LeafMut, LeafValue, NodeMut, NodeRef, OptionalRecord, Record,
    };

    /// A small tree covering every leaf kind, a nested record, and an
    /// optional record two levels down.
    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    #[serde(default)]
    pub struct TestConfig {
        pub host: String,
        pub port: u64,
        pub debug: bool,
        pub offset: i64,
        pub database: TestDbConfig,
    }

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    #[serde(default)]
    pub struct TestDbConfig {
        pub url: String,
        pub pool_size: u64,
        pub limits: Option<TestLimits>,
    }

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    #[serde(default)]
    pub struct TestLimits {
        pub max_rows: u64,
        pub label: String,
    }

    impl TestConfig {
        pub const FIELDS: &'static [FieldMeta] = &[
            FieldMeta::leaf("host", LeafKind::Text)
                .required()
                .doc("The application host."),
            FieldMeta::leaf("port", LeafKind::Uint).doc("The port number."),
            FieldMeta::leaf("debug", LeafKind::Bool).doc("Enable debug mode."),
            FieldMeta::leaf("offset", LeafKind::Int),
            FieldMeta::record("database", TestDbConfig::FIELDS)
                .required()
                .doc("Database settings."),
        ];

        /// Defaults that pass required-field validation.
        pub fn valid() -> Self {
            Self {
                host: "localhost".into(),
                port: 8080,
                database: TestDbConfig {
                    url: "pg://localhost".into(),
                    pool_size: 5,
                    limits: None,
                },
                ..Self::default()
            }
        }
    }

    impl TestDbConfig {
        pub const FIELDS: &'static [FieldMeta] = &[
            FieldMeta::leaf("url", LeafKind::Text)
                .required()
                .doc("Connection string URL."),
            FieldMeta::leaf("pool_size", LeafKind::Uint).doc("Connection pool size."),
            FieldMeta::optional_record("limits", TestLimits::FIELDS),
        ];
    }

    impl TestLimits {
        pub const FIELDS: &'static [FieldMeta] = &[
            FieldMeta::leaf("max_rows", LeafKind::Uint),
            FieldMeta::leaf("label", LeafKind::Text).required(),
        ];
    }

    impl Record for TestConfig {
        fn fields(&self) -> &'static [FieldMeta] {
            Self::FIELDS
        }

        fn get(&self, key: &str) -> Option<NodeRef<'_>> {
            Some(match key {
                "host" => NodeRef::Leaf(LeafValue::Text(self.host.clone())),
                "port" => NodeRef::Leaf(LeafValue::Uint(self.port)),
                "debug" => NodeRef::Leaf(LeafValue::Bool(self.debug)),
                "offset" => NodeRef::Leaf(LeafValue::Int(self.offset)),
                "database" => NodeRef::Record(&self.database),
                _ => return None,
            })
        }

        fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
            Some(match key {
                "host" => NodeMut::Leaf(LeafMut::Text(&mut self.host)),
                "port" => NodeMut::Leaf(LeafMut::Uint(&mut self.port)),
                "debug" => NodeMut::Leaf(LeafMut::Bool(&mut self.debug)),
                "offset" => NodeMut::Leaf(LeafMut::Int(&mut self.offset)),
                "database" => NodeMut::Record(&mut self.database),
                _ => return None,
            })
        }
    }

    impl Record for TestDbConfig {
        fn fields(&self) -> &'static [FieldMeta] {
            Self::FIELDS
        }

        fn get(&self, key: &str) -> Option<NodeRef<'_>> {
            Some(match key {
                "url" => NodeRef::Leaf(LeafValue::Text(self.url.clone())),
                "pool_size" => NodeRef::Leaf(LeafValue::Uint(self.pool_size)),
                "limits" => NodeRef::Optional(self.limits.record()),
                _ => return None,
            })
        }

        fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
            Some(match key {
                "url" => NodeMut::Leaf(LeafMut::Text(&mut self.url)),
                "pool_size" => NodeMut::Leaf(LeafMut::Uint(&mut self.pool_size)),
                "limits" => NodeMut::Optional(&mut self.limits),
                _ => return None,
            })
        }
    }

    impl Record for TestLimits {
        fn fields(&self) -> &'static [FieldMeta] {
            Self::FIELDS
        }

        fn get(&self, key: &str) -> Option<NodeRef<'_>> {
            Some(match key {
                "max_rows" => NodeRef::Leaf(LeafValue::Uint(self.max_rows)),
                "label" => NodeRef::Leaf(LeafValue::Text(self.label.clone())),
                _ => return None,
            })
        }

        fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
            Some(match key {
                "max_rows" => NodeMut::Leaf(LeafMut::Uint(&mut self.max_rows)),
                "label" => NodeMut::Leaf(LeafMut::Text(&mut self.label)),
                _ => return None,
            })
        }
    }

    // -- A record whose table and accessors disagree ---------------------------

    /// `FIELDS` declares `count` as unsigned, but the accessor hands out a text
    /// slot, and `ghost` has no accessor at all.
    #[derive(Debug, Default)]
    pub struct BrokenConfig {
        pub count: String,
    }

    impl BrokenConfig {
        pub const FIELDS: &'static [FieldMeta] = &[
            FieldMeta::leaf("count", LeafKind::Uint),
            FieldMeta::leaf("ghost", LeafKind::Text),
        ];
    }

    impl Record for BrokenConfig {
        fn fields(&self) -> &'static [FieldMeta] {
            Self::FIELDS
        }

        fn get(&self, key: &str) -> Option<NodeRef<'_>> {
            match key {
                "count" => Some(NodeRef::Leaf(LeafValue::Text(self.count.clone()))),
                _ => None,
            }
        }

        fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
            match key {
                "count" => Some(NodeMut::Leaf(LeafMut::Text(&mut self.count))),
                _ => None,
            }
        }
    }

    #[test]
    fn fixture_keys_match_serde_keys() {
        let value = serde_json::to_value(TestConfig::default()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for field in TestConfig::FIELDS {
            assert!(keys.contains(&field.key), "missing {}", field.key);
        }
    }
}
