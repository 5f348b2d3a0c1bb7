// Reference model for the containers under test: a flat list of entries
// with linear insert-if-absent, so the outcome of any key stream is obvious.
struct RefEntries {
    entries: Vec<(MapKey, &'static str)>,
}

impl RefEntries {
    fn new() -> RefEntries {
        RefEntries { entries: vec![] }
    }

    fn insert_if_absent(&mut self, key: MapKey, value: &'static str) -> bool {
        if self.entries.iter().any(|(k, _)| *k == key) {
            false
        } else {
            self.entries.push((key, value));
            true
        }
    }

    fn get(&self, key: &MapKey) -> Option<&'static str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn sorted(&self) -> Vec<(MapKey, &'static str)> {
        let mut entries = self.entries.clone();
        entries.sort();
        entries
    }

    // replay the draw order of populate() against the model.
    fn populate<R: Rng>(capacity: usize, rng: &mut R) -> (RefEntries, MapKey) {
        let mut refns = RefEntries::new();
        for _ in 0..capacity {
            refns.insert_if_absent(MapKey::new(rng.gen::<i32>()), MAP_ELEMENT);
        }
        let marked = MapKey::new(rng.gen::<i32>());
        refns.insert_if_absent(marked, MAP_ELEMENT);
        (refns, marked)
    }
}

fn sorted_entries<C: Container>(container: &C) -> Vec<(MapKey, &'static str)> {
    let mut entries = container.entries();
    entries.sort();
    entries
}
