#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use crate::opt::Slot;
    use crate::registry::OptionSet;

    pub struct SampleSlots {
        pub foo: Slot<String>,
        pub verbose: Slot<bool>,
        pub port: Slot<i64>,
        pub timeout: Slot<Duration>,
        pub tags: Slot<Vec<String>>,
        pub log_level: Slot<String>,
    }

    /// A registry for app `test` with one option of each kind.
    pub fn sample_set() -> (OptionSet, SampleSlots) {
        let mut o = OptionSet::new("test");
        let slots = SampleSlots {
            foo: o.string("foo", None, "", "Free-form text.").unwrap(),
            verbose: o.bool("verbose", 'v', false, "Enable verbose output.").unwrap(),
            port: o.int("port", 'p', 8080, "The port number.").unwrap(),
            timeout: o
                .duration("timeout", None, Duration::from_secs(30), "Request timeout.")
                .unwrap(),
            tags: o.list("tags", None, &[], "Tags to attach.").unwrap(),
            log_level: o
                .string("log.level", 'l', "info", "Minimum log level.")
                .unwrap(),
        };
        (o, slots)
    }

    #[test]
    fn sample_set_has_defaults() {
        let (o, slots) = sample_set();
        assert_eq!(o.len(), 6);
        assert_eq!(slots.port.get(), 8080);
        assert_eq!(slots.log_level.get(), "info");
        assert!(slots.tags.get().is_empty());
    }
}
