use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::common::{debug, Result};
use crate::shim::{key_range, new_tx_id, Chaincode, ChaincodeStub, Key, KeyValue, Response};
use crate::shim::{StateIterator, Value};

/// In-memory stub for exercising chaincode without a ledger file.
/// Writes are applied immediately, so later reads in the same call see them.
#[derive(Debug, Default)]
pub struct MockStub {
    name: String,
    tx_id: String,
    args: Vec<String>,
    state: BTreeMap<String, Value>,
}

impl MockStub {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn mock_init<C, I, S>(&mut self, chaincode: &C, args: I) -> Response
    where
        C: Chaincode + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.begin(args);
        chaincode.init(self).await
    }

    /// Invoke `chaincode` with `args`, the first of which names the function.
    pub async fn mock_invoke<C, I, S>(&mut self, chaincode: &C, args: I) -> Response
    where
        C: Chaincode + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.begin(args);
        chaincode.invoke(self).await
    }

    /// Store a value directly, bypassing any chaincode.
    pub fn seed_state(&mut self, key: impl Into<String>, value: impl Into<Box<[u8]>>) {
        self.state
            .insert(key.into(), Value::new_unchecked(value.into()));
    }

    pub fn state(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    fn begin<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tx_id = new_tx_id();
        self.args = args.into_iter().map(Into::into).collect();
        debug!(stub=%self.name, tx_id=%self.tx_id, args=?self.args, "Mock call");
    }
}

#[async_trait]
impl ChaincodeStub for MockStub {
    fn function_and_parameters(&self) -> (String, Vec<String>) {
        match self.args.split_first() {
            Some((function, params)) => (function.clone(), params.to_vec()),
            None => (String::new(), Vec::new()),
        }
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    async fn get_state(&mut self, key: &str) -> Result<Option<Value>> {
        Ok(self.state.get(key).cloned())
    }

    async fn put_state(&mut self, key: &str, value: Value) -> Result<()> {
        let key = Key::new(key)?;
        self.state.insert(key.into_string(), value);
        Ok(())
    }

    async fn get_state_by_range(
        &mut self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateIterator> {
        let results = match key_range(start_key, end_key) {
            Some(range) => self
                .state
                .range::<str, _>(range)
                .map(|(key, value)| {
                    Ok(KeyValue {
                        key: Key::new_unchecked(key.as_str()),
                        value: value.clone(),
                    })
                })
                .collect(),
            None => Vec::new(),
        };
        Ok(StateIterator::new(results))
    }
}
