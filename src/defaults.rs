//! Handlers for the built-in pointee types.
//!
//! Primitives are defined directly on the flag set with the variable's
//! current value as the default. Collections and IP addresses go through
//! the adapters in [`values`](crate::values).

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use crate::flagset::FlagSet;
use crate::registry::{Handler, typed_handler};
use crate::types::{Header, TypeKey};
use crate::values::{
    HeaderValue, IntList, IpValue, StringList, StringListMap, StringMap, UintList,
};
use crate::var::Var;

/// The table every new [`Confinator`](crate::Confinator) starts from.
pub fn default_handlers() -> Vec<(TypeKey, Handler)> {
    vec![
        entry::<bool>(|fs, p, name, usage| fs.bool_var(p, name, p.get(), usage)),
        entry::<String>(|fs, p, name, usage| fs.string_var(p, name, p.get(), usage)),
        entry::<isize>(|fs, p, name, usage| fs.int_var(p, name, p.get(), usage)),
        entry::<usize>(|fs, p, name, usage| fs.uint_var(p, name, p.get(), usage)),
        entry::<i64>(|fs, p, name, usage| fs.int64_var(p, name, p.get(), usage)),
        entry::<u64>(|fs, p, name, usage| fs.uint64_var(p, name, p.get(), usage)),
        entry::<Duration>(|fs, p, name, usage| fs.duration_var(p, name, p.get(), usage)),
        entry::<Option<IpAddr>>(|fs, p, name, usage| fs.var(IpValue::new(p), name, usage)),
        entry::<Vec<String>>(|fs, p, name, usage| fs.var(StringList::new(p), name, usage)),
        entry::<Vec<isize>>(|fs, p, name, usage| fs.var(IntList::new(p), name, usage)),
        entry::<Vec<usize>>(|fs, p, name, usage| fs.var(UintList::new(p), name, usage)),
        entry::<HashMap<String, String>>(|fs, p, name, usage| {
            fs.var(StringMap::new(p), name, usage)
        }),
        entry::<HashMap<String, Vec<String>>>(|fs, p, name, usage| {
            fs.var(StringListMap::new(p), name, usage)
        }),
        entry::<Header>(|fs, p, name, usage| fs.var(HeaderValue::new(p), name, usage)),
    ]
}

fn entry<T>(
    handler: impl Fn(&mut FlagSet, &Var<T>, &str, &str) + Send + Sync + 'static,
) -> (TypeKey, Handler)
where
    T: Send + Sync + 'static,
{
    (TypeKey::of::<T>(), typed_handler(handler))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_builtin_has_a_distinct_key() {
        let table = default_handlers();
        let keys: HashSet<TypeKey> = table.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys.len(), table.len());
        assert_eq!(table.len(), 14);
    }

    #[test]
    fn covers_layout_twins_separately() {
        let keys: HashSet<TypeKey> = default_handlers().into_iter().map(|(key, _)| key).collect();
        assert!(keys.contains(&TypeKey::of::<HashMap<String, Vec<String>>>()));
        assert!(keys.contains(&TypeKey::of::<Header>()));
    }

    #[test]
    fn primitive_handlers_document_current_value() {
        let table: HashMap<TypeKey, Handler> = default_handlers().into_iter().collect();
        let mut fs = FlagSet::new("defaults");

        let timeout = Var::new(Duration::from_secs(90));
        table[&TypeKey::of::<Duration>()](&mut fs, &timeout, "timeout", "request timeout");
        let name = Var::new("svc".to_string());
        table[&TypeKey::of::<String>()](&mut fs, &name, "name", "service name");

        assert_eq!(fs.lookup("timeout").unwrap().default_value(), "1m30s");
        assert_eq!(fs.lookup("name").unwrap().default_value(), "svc");
        assert_eq!(timeout.get(), Duration::from_secs(90));
    }

    #[test]
    fn composite_handlers_register_adapters() {
        let table: HashMap<TypeKey, Handler> = default_handlers().into_iter().collect();
        let mut fs = FlagSet::new("defaults");

        let tags = Var::new(vec!["stale".to_string()]);
        table[&TypeKey::of::<Vec<String>>()](&mut fs, &tags, "tag", "");
        let ip = Var::new(None::<IpAddr>);
        table[&TypeKey::of::<Option<IpAddr>>()](&mut fs, &ip, "ip", "");

        let flag = fs.lookup("tag").unwrap();
        assert_eq!(flag.default_value(), "");
        let adapter = flag.value().as_any().downcast_ref::<StringList>().unwrap();
        assert!(adapter.expose().ptr_eq(&tags));
        assert!(fs.lookup("ip").unwrap().value().as_any().is::<IpValue>());
    }
}
