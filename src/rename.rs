//! Applying a mapping to a symbol graph.

use std::collections::BTreeMap;
use std::fmt;

use crate::filter::is_candidate;
use crate::mapping::Mapping;
use crate::ports::{EventSink, PatchEvent, SymbolDomain, SymbolGraph};

/// Renames per domain from one [`RenameEngine::apply`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameSummary {
    counts: BTreeMap<SymbolDomain, usize>,
}

impl RenameSummary {
    /// Renames applied in `domain`.
    #[must_use]
    pub fn count(&self, domain: SymbolDomain) -> usize {
        self.counts.get(&domain).copied().unwrap_or_default()
    }

    /// Renames applied across all domains.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    fn record(&mut self, domain: SymbolDomain) {
        *self.counts.entry(domain).or_default() += 1;
    }
}

impl fmt::Display for RenameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = SymbolDomain::ALL
            .iter()
            .map(|d| format!("{} {}", self.count(*d), d.as_str()))
            .collect();
        write!(f, "{} renamed ({})", self.total(), parts.join(", "))
    }
}

/// Renames obfuscated symbols using a resolved mapping.
pub struct RenameEngine<'a> {
    mapping: &'a Mapping,
    events: &'a dyn EventSink,
}

impl<'a> RenameEngine<'a> {
    /// Creates an engine for `mapping`, reporting each rename to `events`.
    #[must_use]
    pub fn new(mapping: &'a Mapping, events: &'a dyn EventSink) -> Self {
        Self { mapping, events }
    }

    /// Renames every candidate symbol with a mapping entry, in every domain.
    ///
    /// Types are only renamed when the mapped name differs from the current
    /// one. Members are renamed (and reported) even when it does not.
    pub fn apply<G: SymbolGraph>(&self, graph: &mut G) -> RenameSummary {
        let mut summary = RenameSummary::default();
        for domain in SymbolDomain::ALL {
            for handle in graph.symbols(domain) {
                let current = graph.name(&handle);
                if !is_candidate(current) {
                    continue;
                }
                let Some(real) = self.mapping.get(current) else {
                    continue;
                };
                if domain == SymbolDomain::Type && real == current {
                    continue;
                }
                let from = current.to_string();
                graph.rename(&handle, real);
                self.events.emit(&PatchEvent::Renamed { domain, from, to: real.to_string() });
                summary.record(domain);
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::CollectingEventSink;

    /// Flat graph: one list of names per domain.
    #[derive(Default)]
    struct ListGraph {
        names: Vec<(SymbolDomain, String)>,
    }

    impl ListGraph {
        fn with(mut self, domain: SymbolDomain, name: &str) -> Self {
            self.names.push((domain, name.to_string()));
            self
        }

        fn names_in(&self, domain: SymbolDomain) -> Vec<&str> {
            self.names.iter().filter(|(d, _)| *d == domain).map(|(_, n)| n.as_str()).collect()
        }
    }

    impl SymbolGraph for ListGraph {
        type Handle = usize;

        fn symbols(&self, domain: SymbolDomain) -> Vec<usize> {
            (0..self.names.len()).filter(|&i| self.names[i].0 == domain).collect()
        }

        fn name(&self, handle: &usize) -> &str {
            &self.names[*handle].1
        }

        fn rename(&mut self, handle: &usize, new_name: &str) {
            new_name.clone_into(&mut self.names[*handle].1);
        }
    }

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs.iter().copied().collect()
    }

    #[test]
    fn renames_mapped_type_and_leaves_unmapped_one() {
        let mapping = mapping(&[("HELLOWORLDX", "Greet")]);
        let events = CollectingEventSink::new();
        let mut graph = ListGraph::default()
            .with(SymbolDomain::Type, "HELLOWORLDX")
            .with(SymbolDomain::Type, "ZZZZZZZZZZZ");

        let summary = RenameEngine::new(&mapping, &events).apply(&mut graph);

        assert_eq!(graph.names_in(SymbolDomain::Type), vec!["Greet", "ZZZZZZZZZZZ"]);
        assert_eq!(summary.count(SymbolDomain::Type), 1);
        assert_eq!(
            events.events(),
            vec![PatchEvent::Renamed {
                domain: SymbolDomain::Type,
                from: "HELLOWORLDX".into(),
                to: "Greet".into(),
            }]
        );
    }

    #[test]
    fn every_domain_is_renamed() {
        let mapping = mapping(&[
            ("TTTTTTTTTTT", "Player"),
            ("MMMMMMMMMMM", "Jump"),
            ("PPPPPPPPPPP", "height"),
            ("FFFFFFFFFFF", "health"),
            ("RRRRRRRRRRR", "Speed"),
            ("EEEEEEEEEEE", "OnDeath"),
        ]);
        let events = CollectingEventSink::new();
        let mut graph = ListGraph::default()
            .with(SymbolDomain::Type, "TTTTTTTTTTT")
            .with(SymbolDomain::Method, "MMMMMMMMMMM")
            .with(SymbolDomain::Parameter, "PPPPPPPPPPP")
            .with(SymbolDomain::Field, "FFFFFFFFFFF")
            .with(SymbolDomain::Property, "RRRRRRRRRRR")
            .with(SymbolDomain::Event, "EEEEEEEEEEE");

        let summary = RenameEngine::new(&mapping, &events).apply(&mut graph);

        assert_eq!(summary.total(), 6);
        for domain in SymbolDomain::ALL {
            assert_eq!(summary.count(domain), 1, "{domain}");
        }
        assert_eq!(graph.names_in(SymbolDomain::Event), vec!["OnDeath"]);
    }

    #[test]
    fn non_candidates_are_ignored_even_when_mapped() {
        let mapping = mapping(&[("Update", "Tick"), ("ABCDEFGHIJ", "Short")]);
        let events = CollectingEventSink::new();
        let mut graph = ListGraph::default()
            .with(SymbolDomain::Method, "Update")
            .with(SymbolDomain::Method, "ABCDEFGHIJ");

        let summary = RenameEngine::new(&mapping, &events).apply(&mut graph);

        assert_eq!(summary.total(), 0);
        assert_eq!(graph.names_in(SymbolDomain::Method), vec!["Update", "ABCDEFGHIJ"]);
        assert!(events.events().is_empty());
    }

    #[test]
    fn identity_mapping_skips_types_but_reports_members() {
        let mapping = mapping(&[("SAMENAMEXYZ", "SAMENAMEXYZ")]);
        let events = CollectingEventSink::new();
        let mut graph = ListGraph::default()
            .with(SymbolDomain::Type, "SAMENAMEXYZ")
            .with(SymbolDomain::Field, "SAMENAMEXYZ");

        let summary = RenameEngine::new(&mapping, &events).apply(&mut graph);

        assert_eq!(summary.count(SymbolDomain::Type), 0);
        assert_eq!(summary.count(SymbolDomain::Field), 1);
        assert_eq!(events.rename_count(), 1);
    }

    #[test]
    fn second_pass_is_silent_for_types_only() {
        // The real name is itself a candidate and maps to itself.
        let mapping = mapping(&[("OBFUSCATEDX", "REALNAMEXYZ"), ("REALNAMEXYZ", "REALNAMEXYZ")]);
        let mut graph = ListGraph::default()
            .with(SymbolDomain::Type, "OBFUSCATEDX")
            .with(SymbolDomain::Field, "OBFUSCATEDX");

        let first = CollectingEventSink::new();
        RenameEngine::new(&mapping, &first).apply(&mut graph);
        assert_eq!(first.rename_count(), 2);

        let second = CollectingEventSink::new();
        let summary = RenameEngine::new(&mapping, &second).apply(&mut graph);

        assert_eq!(graph.names_in(SymbolDomain::Type), vec!["REALNAMEXYZ"]);
        assert_eq!(summary.count(SymbolDomain::Type), 0);
        assert_eq!(summary.count(SymbolDomain::Field), 1);
        assert_eq!(second.rename_count(), 1);
    }

    #[test]
    fn summary_display_lists_each_domain() {
        let mut summary = RenameSummary::default();
        summary.record(SymbolDomain::Field);
        summary.record(SymbolDomain::Field);
        summary.record(SymbolDomain::Type);

        assert_eq!(
            summary.to_string(),
            "3 renamed (1 type, 0 method, 0 parameter, 2 field, 0 property, 0 event)"
        );
    }
}
