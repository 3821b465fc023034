use phrasestore::config::DEFAULT_PHRASES;
use phrasestore::dispatch::{collect, demo_plan, Binding, Completion, Dispatcher, Ordering};
use phrasestore::{Phrase, PhraseStore};

#[test]
fn test_reopen_keeps_rows_and_continues_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.sqlite");

    {
        let store = PhraseStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        for text in DEFAULT_PHRASES {
            store.insert_phrase(text).unwrap();
        }
        store.close().unwrap();
    }

    let store = PhraseStore::open(&path).unwrap();
    store.ensure_schema().unwrap();
    assert_eq!(store.count_phrases().unwrap(), 4);

    let id = store.insert_phrase("Hello again!").unwrap();
    assert_eq!(id, 5);

    let ids: Vec<i64> = store.list_phrases().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_serialized_demo_run_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhraseStore::open(&dir.path().join("db.sqlite")).unwrap();

    let dispatcher = Dispatcher::new(store, Ordering::Serialized, Binding::Bound);
    let completions = collect(dispatcher.dispatch(demo_plan(&DEFAULT_PHRASES))).await;

    assert_eq!(completions.len(), 6);
    assert!(completions.iter().all(Completion::is_ok));

    let expected: Vec<Phrase> = DEFAULT_PHRASES
        .iter()
        .enumerate()
        .map(|(i, text)| Phrase::new(i as i64 + 1, *text))
        .collect();
    assert_eq!(completions[5].rows().unwrap(), expected.as_slice());

    dispatcher.into_store().unwrap().close().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_detached_demo_runs_show_the_ordering_hazard() {
    let dir = tempfile::tempdir().unwrap();
    let mut hazard_runs = 0;

    for run in 0..20 {
        let store = PhraseStore::open(&dir.path().join(format!("run-{}.sqlite", run))).unwrap();
        let dispatcher = Dispatcher::new(store, Ordering::Detached, Binding::Bound);
        let completions = collect(dispatcher.dispatch(demo_plan(&DEFAULT_PHRASES))).await;
        assert_eq!(completions.len(), 6);

        let stored_inserts = completions
            .iter()
            .filter(|c| matches!(c, Completion::Insert { result: Ok(_), .. }))
            .count();

        // Fails with "no such table" when it overtakes schema creation.
        let listed = completions.iter().find_map(Completion::rows).map(<[Phrase]>::len);
        if let Some(len) = listed {
            assert!(len <= stored_inserts);
        }

        let failed = completions.iter().any(|c| !c.is_ok());
        if failed || listed != Some(DEFAULT_PHRASES.len()) {
            hazard_runs += 1;
        }

        let store = dispatcher.into_store().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.count_phrases().unwrap(), stored_inserts);
        store.close().unwrap();
    }

    assert!(hazard_runs > 0, "every detached run behaved like a serialized one");
}

#[test]
fn test_schema_twice_on_fresh_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhraseStore::open(&dir.path().join("fresh.sqlite")).unwrap();
    store.ensure_schema().unwrap();
    store.ensure_schema().unwrap();
    assert!(store.list_phrases().unwrap().is_empty());
}
