//! In-memory appliance for mapper tests
//!
//! Objects are kept by path. `POST` to a collection stores the body under
//! `{collection}/{name}`, `PUT` to an object merges into it, `PUT` to
//! `{object}/{block}` records a sub-resource payload, `GET` returns the
//! `{token, object, data}` envelope and `DELETE` removes the object and
//! everything below it. Every call is recorded.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::client::{ClientError, ClientResult, Method, WafApi};

#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    objects: BTreeMap<String, Map<String, Value>>,
    blocks: BTreeMap<String, Vec<Map<String, Value>>>,
    calls: Vec<Call>,
    failures: Vec<(Method, String)>,
    create_routes: HashMap<String, String>,
    get_overrides: HashMap<String, Value>,
    write_only: Vec<String>,
    missing_as_404: bool,
}

#[derive(Default)]
pub struct StubAppliance {
    inner: Mutex<Inner>,
}

fn api(status: u16, message: impl Into<String>) -> ClientError {
    ClientError::Api {
        status,
        message: message.into(),
    }
}

impl StubAppliance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects posted to `post_path` are stored in `collection`
    pub fn with_create_route(self, post_path: &str, collection: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .create_routes
            .insert(post_path.to_string(), collection.to_string());
        self
    }

    /// Answer `method path` with a 500
    pub fn fail_on(self, method: Method, path: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .failures
            .push((method, path.to_string()));
        self
    }

    /// Answer `GET` of a missing object with 404 instead of an empty collection
    pub fn missing_as_404(self) -> Self {
        self.inner.lock().unwrap().missing_as_404 = true;
        self
    }

    /// Fixed `GET` response for a path
    pub fn respond_to_get(self, path: &str, body: Value) -> Self {
        self.inner
            .lock()
            .unwrap()
            .get_overrides
            .insert(path.to_string(), body);
        self
    }

    /// Accept `key` on writes but never return it on `GET`
    pub fn write_only(self, key: &str) -> Self {
        self.inner.lock().unwrap().write_only.push(key.to_string());
        self
    }

    /// Store an object directly
    pub fn seed(self, path: &str, object: Value) -> Self {
        if let Value::Object(object) = object {
            self.inner
                .lock()
                .unwrap()
                .objects
                .insert(path.to_string(), object);
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Calls with the given method whose path ends with `suffix`
    pub fn calls_to(&self, method: Method, suffix: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path.ends_with(suffix))
            .collect()
    }

    pub fn object(&self, path: &str) -> Option<Map<String, Value>> {
        self.inner.lock().unwrap().objects.get(path).cloned()
    }

    pub fn block_payloads(&self, path: &str) -> Vec<Map<String, Value>> {
        self.inner
            .lock()
            .unwrap()
            .blocks
            .get(path)
            .cloned()
            .unwrap_or_default()
    }
}

impl Inner {
    fn post(&mut self, path: &str, body: Option<&Value>) -> ClientResult<Value> {
        let collection = self
            .create_routes
            .get(path)
            .cloned()
            .unwrap_or_else(|| path.to_string());

        if let Some((parent, _)) = collection.rsplit_once('/')
            && !self.objects.contains_key(parent)
        {
            return Err(api(404, format!("{} does not exist", parent)));
        }

        let Some(Value::Object(body)) = body else {
            return Err(api(400, "request body must be an object"));
        };
        let Some(name) = body.get("name").and_then(Value::as_str) else {
            return Err(api(400, "name is required"));
        };

        let object_path = format!("{}/{}", collection, name);
        if self.objects.contains_key(&object_path) {
            return Err(api(409, format!("{} already exists", name)));
        }
        self.objects.insert(object_path, body.clone());
        Ok(json!({"id": name, "token": "stub-token"}))
    }

    fn put(&mut self, path: &str, body: Option<&Value>) -> ClientResult<Value> {
        let Some(Value::Object(body)) = body else {
            return Err(api(400, "request body must be an object"));
        };

        if let Some(mut object) = self.objects.remove(path) {
            for (k, v) in body {
                object.insert(k.clone(), v.clone());
            }
            let target = match (object.get("name").and_then(Value::as_str), path.rsplit_once('/')) {
                (Some(name), Some((collection, _))) => format!("{}/{}", collection, name),
                _ => path.to_string(),
            };
            self.objects.insert(target, object);
            return Ok(json!({"token": "stub-token"}));
        }

        match path.rsplit_once('/') {
            Some((object, _)) if self.objects.contains_key(object) => {
                self.blocks
                    .entry(path.to_string())
                    .or_default()
                    .push(body.clone());
                Ok(json!({"token": "stub-token"}))
            }
            _ => Err(api(404, format!("{} does not exist", path))),
        }
    }

    fn get(&self, path: &str) -> ClientResult<Value> {
        if let Some(body) = self.get_overrides.get(path) {
            return Ok(body.clone());
        }
        match self.objects.get(path) {
            Some(object) => {
                let mut object = object.clone();
                object.retain(|k, _| !self.write_only.contains(k));
                let name = object
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Ok(json!({
                    "token": "stub-token",
                    "object": "Stub",
                    "data": { name: object },
                }))
            }
            None if self.missing_as_404 => Err(api(404, format!("{} does not exist", path))),
            None => Ok(json!({"token": "stub-token", "object": "Stub", "data": {}})),
        }
    }

    fn delete(&mut self, path: &str) -> ClientResult<Value> {
        if self.objects.remove(path).is_none() {
            return Err(api(404, format!("{} does not exist", path)));
        }
        let prefix = format!("{}/", path);
        self.objects.retain(|k, _| !k.starts_with(&prefix));
        Ok(json!({"token": "stub-token"}))
    }
}

#[async_trait]
impl WafApi for StubAppliance {
    async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> ClientResult<Value> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        if inner
            .failures
            .iter()
            .any(|(m, p)| *m == method && p == path)
        {
            return Err(api(500, "injected failure"));
        }

        match method {
            Method::Post => inner.post(path, body),
            Method::Put => inner.put(path, body),
            Method::Get => inner.get(path),
            Method::Delete => inner.delete(path),
        }
    }
}
