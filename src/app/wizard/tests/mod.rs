//! Machine-level tests for the selection wizard
//!
//! These drive the wizard exclusively through its public event interface,
//! with a synthetic catalog standing in for the remote dataset.

#[cfg(test)]
mod navigation {
    use super::super::*;
    use crate::app::catalog::{Arch, Configuration, OperatingSystem, SourceItem, WebSource};
    use crate::app::download::JobState;
    use crate::errors::CatalogError;

    fn web(url: &str) -> SourceItem {
        SourceItem::Web(WebSource {
            url: url.to_string(),
            checksum: None,
            file_name: None,
        })
    }

    fn config(release: &str, edition: Option<&str>, arch: Option<Arch>) -> Configuration {
        Configuration {
            release: release.to_string(),
            edition: edition.map(str::to_string),
            arch,
            iso: vec![web(&format!("https://example.com/{release}.iso"))],
            img: vec![],
            fixed_iso: vec![],
            floppy: vec![],
            disk_images: vec![],
        }
    }

    fn os(name: &str, releases: Vec<Configuration>) -> OperatingSystem {
        OperatingSystem {
            name: name.to_string(),
            pretty_name: name.to_string(),
            description: None,
            releases,
        }
    }

    fn press(wizard: &mut Wizard, action: KeyAction) -> Effect {
        wizard.update(WizardEvent::Key(action))
    }

    fn deliver(wizard: &mut Wizard, catalog: Vec<OperatingSystem>) {
        wizard.update(WizardEvent::CatalogLoaded(Ok(catalog)));
    }

    /// Deterministically highlight an architecture from any starting cursor
    fn choose_arch(wizard: &mut Wizard, arch: Arch) {
        for _ in 0..Arch::ALL.len() {
            press(wizard, KeyAction::Up);
        }
        let steps = Arch::ALL.iter().position(|a| *a == arch).unwrap();
        for _ in 0..steps {
            press(wizard, KeyAction::Down);
        }
        press(wizard, KeyAction::Confirm);
    }

    #[test]
    fn test_round_trip_restores_architecture_highlight() {
        let mut wizard = Wizard::new();

        choose_arch(&mut wizard, Arch::Aarch64);
        assert!(matches!(wizard.current(), Screen::Os(_)));
        assert_eq!(wizard.path().arch, Some(Arch::Aarch64));

        deliver(
            &mut wizard,
            vec![os(
                "debian",
                vec![
                    config("12", None, Some(Arch::Aarch64)),
                    config("12", None, Some(Arch::X86_64)),
                ],
            )],
        );
        press(&mut wizard, KeyAction::Confirm);
        assert!(matches!(wizard.current(), Screen::Release(_)));

        press(&mut wizard, KeyAction::Char('h'));
        press(&mut wizard, KeyAction::Char('h'));

        match wizard.current() {
            Screen::Architecture(screen) => {
                assert_eq!(screen.picker.selected(), Some(&Arch::Aarch64));
            }
            other => panic!("expected architecture screen, got {other:?}"),
        }
        assert_eq!(wizard.path(), &SelectionPath::default());
    }

    #[test]
    fn test_os_screen_populates_when_catalog_arrives_first() {
        let mut wizard = Wizard::new();
        deliver(&mut wizard, vec![os("alpine", vec![config("3.20", None, None)])]);

        choose_arch(&mut wizard, Arch::X86_64);
        match wizard.current() {
            Screen::Os(screen) => {
                let picker = screen.picker.as_ref().expect("picker built from cache");
                assert_eq!(picker.selected().map(|o| o.name.as_str()), Some("alpine"));
            }
            other => panic!("expected OS screen, got {other:?}"),
        }
    }

    #[test]
    fn test_os_screen_waits_for_catalog() {
        let mut wizard = Wizard::new();
        choose_arch(&mut wizard, Arch::X86_64);

        match wizard.current() {
            Screen::Os(screen) => assert!(screen.picker.is_none()),
            other => panic!("expected OS screen, got {other:?}"),
        }

        // Confirm does nothing until the data shows up.
        press(&mut wizard, KeyAction::Confirm);
        assert!(matches!(wizard.current(), Screen::Os(_)));

        deliver(&mut wizard, vec![os("alpine", vec![config("3.20", None, None)])]);
        match wizard.current() {
            Screen::Os(screen) => assert!(screen.picker.is_some()),
            other => panic!("expected OS screen, got {other:?}"),
        }
    }

    #[test]
    fn test_release_rows_are_deduplicated_in_first_seen_order() {
        let mut wizard = Wizard::new();
        deliver(
            &mut wizard,
            vec![os(
                "ubuntu",
                vec![
                    config("22.04", Some("Desktop"), None),
                    config("22.04", Some("Server"), None),
                    config("20.04", None, None),
                ],
            )],
        );
        choose_arch(&mut wizard, Arch::X86_64);
        press(&mut wizard, KeyAction::Confirm);

        match wizard.current() {
            Screen::Release(screen) => {
                let rows: Vec<&str> = screen.picker.visible_rows().map(String::as_str).collect();
                assert_eq!(rows, vec!["22.04", "20.04"]);
            }
            other => panic!("expected release screen, got {other:?}"),
        }
    }

    #[test]
    fn test_lone_editionless_release_skips_edition_screen() {
        let mut wizard = Wizard::new();
        deliver(
            &mut wizard,
            vec![os(
                "alpine",
                vec![config("3.20", None, None), config("3.19", None, None)],
            )],
        );
        choose_arch(&mut wizard, Arch::X86_64);
        press(&mut wizard, KeyAction::Confirm);
        press(&mut wizard, KeyAction::Confirm);

        assert!(matches!(wizard.current(), Screen::Confirm(_)));
        assert_eq!(wizard.path().release.as_deref(), Some("3.20"));
        assert_eq!(wizard.path().edition, None);
    }

    #[test]
    fn test_lone_labeled_release_still_requires_edition() {
        let mut wizard = Wizard::new();
        deliver(
            &mut wizard,
            vec![os("fedora", vec![config("41", Some("Workstation"), None)])],
        );
        choose_arch(&mut wizard, Arch::X86_64);
        press(&mut wizard, KeyAction::Confirm);
        press(&mut wizard, KeyAction::Confirm);

        assert!(matches!(wizard.current(), Screen::Edition(_)));
    }

    #[test]
    fn test_edition_commit_finalizes_the_configuration() {
        let mut wizard = Wizard::new();
        deliver(
            &mut wizard,
            vec![os(
                "ubuntu",
                vec![
                    config("24.04", Some("Desktop"), None),
                    config("24.04", Some("Server"), None),
                ],
            )],
        );
        choose_arch(&mut wizard, Arch::X86_64);
        press(&mut wizard, KeyAction::Confirm);
        press(&mut wizard, KeyAction::Confirm);

        press(&mut wizard, KeyAction::Down);
        press(&mut wizard, KeyAction::Confirm);

        match wizard.current() {
            Screen::Confirm(screen) => {
                assert_eq!(screen.config.edition.as_deref(), Some("Server"));
            }
            other => panic!("expected confirm screen, got {other:?}"),
        }
        assert_eq!(wizard.path().edition.as_deref(), Some("Server"));
    }

    #[test]
    fn test_search_captures_quit_character() {
        let mut wizard = Wizard::new();
        deliver(
            &mut wizard,
            vec![os("ubuntu", vec![config("24.04", None, None)])],
        );
        choose_arch(&mut wizard, Arch::X86_64);
        press(&mut wizard, KeyAction::Confirm);

        press(&mut wizard, KeyAction::Char('/'));
        let effect = press(&mut wizard, KeyAction::Char('q'));

        assert_eq!(effect, Effect::Continue);
        match wizard.current() {
            Screen::Release(screen) => assert_eq!(screen.picker.query(), "q"),
            other => panic!("expected release screen, got {other:?}"),
        }
    }

    #[test]
    fn test_quit_outside_search() {
        let mut wizard = Wizard::new();
        assert_eq!(press(&mut wizard, KeyAction::Char('q')), Effect::Quit);

        let mut wizard = Wizard::new();
        assert_eq!(press(&mut wizard, KeyAction::Interrupt), Effect::Quit);
    }

    #[test]
    fn test_url_listing_round_trip() {
        let mut wizard = Wizard::new();
        let mut cfg = config("3.20", None, None);
        cfg.img = vec![web("https://example.com/extra.img")];
        deliver(&mut wizard, vec![os("alpine", vec![cfg])]);
        choose_arch(&mut wizard, Arch::X86_64);
        press(&mut wizard, KeyAction::Confirm);
        press(&mut wizard, KeyAction::Confirm);

        // Second row of the confirm screen lists the URLs.
        press(&mut wizard, KeyAction::Down);
        press(&mut wizard, KeyAction::Confirm);

        match wizard.current() {
            Screen::Urls(screen) => {
                let rows: Vec<&str> = screen.picker.visible_rows().map(String::as_str).collect();
                assert_eq!(
                    rows,
                    vec!["https://example.com/3.20.iso", "https://example.com/extra.img"]
                );
            }
            other => panic!("expected URL screen, got {other:?}"),
        }

        press(&mut wizard, KeyAction::Char('h'));
        assert!(matches!(wizard.current(), Screen::Confirm(_)));
    }

    #[test]
    fn test_catalog_failure_replaces_everything() {
        let mut wizard = Wizard::new();
        choose_arch(&mut wizard, Arch::X86_64);

        wizard.update(WizardEvent::CatalogLoaded(Err(CatalogError::ServerError {
            status: 503,
        })));

        assert!(matches!(wizard.current(), Screen::Failure(_)));
        assert_eq!(wizard.path(), &SelectionPath::default());
        assert_eq!(press(&mut wizard, KeyAction::Char('x')), Effect::Quit);
    }

    #[tokio::test]
    async fn test_download_flow_reaches_terminal_state() {
        let destination = tempfile::tempdir().unwrap();
        let mut wizard = Wizard::new();

        let mut cfg = config("1.0", None, None);
        cfg.iso = vec![web("not a url")];
        cfg.img = vec![web("also not a url")];
        deliver(&mut wizard, vec![os("testos", vec![cfg])]);

        choose_arch(&mut wizard, Arch::X86_64);
        press(&mut wizard, KeyAction::Confirm);
        press(&mut wizard, KeyAction::Confirm);
        press(&mut wizard, KeyAction::Confirm);
        assert!(matches!(wizard.current(), Screen::Destination(_)));

        // Replace the pre-filled working directory with the scratch dir.
        for _ in 0..512 {
            press(&mut wizard, KeyAction::Backspace);
        }
        for c in destination.path().display().to_string().chars() {
            press(&mut wizard, KeyAction::Char(c));
        }
        press(&mut wizard, KeyAction::Confirm);
        assert!(matches!(wizard.current(), Screen::Downloading(_)));

        // Both sources fail at URL parsing, so the jobs settle quickly.
        for _ in 0..50 {
            wizard.update(WizardEvent::Tick);
            if let Screen::Downloading(screen) = wizard.current() {
                if screen.finished() {
                    break;
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        match wizard.current() {
            Screen::Downloading(screen) => {
                assert!(screen.finished());
                assert_eq!(screen.snapshot.jobs.len(), 2);
                assert!(screen
                    .snapshot
                    .jobs
                    .iter()
                    .all(|job| matches!(job.state, JobState::Failed(_))));
            }
            other => panic!("expected downloading screen, got {other:?}"),
        }

        // Once everything is terminal, any key ends the wizard.
        assert_eq!(press(&mut wizard, KeyAction::Char('x')), Effect::Quit);
    }

    #[test]
    fn test_rejected_destination_keeps_the_screen() {
        let mut wizard = Wizard::new();
        deliver(&mut wizard, vec![os("alpine", vec![config("3.20", None, None)])]);
        choose_arch(&mut wizard, Arch::X86_64);
        press(&mut wizard, KeyAction::Confirm);
        press(&mut wizard, KeyAction::Confirm);
        press(&mut wizard, KeyAction::Confirm);

        for _ in 0..512 {
            press(&mut wizard, KeyAction::Backspace);
        }
        for c in "/definitely/not/a/real/directory".chars() {
            press(&mut wizard, KeyAction::Char(c));
        }
        press(&mut wizard, KeyAction::Confirm);

        match wizard.current() {
            Screen::Destination(screen) => {
                assert!(screen.error.as_deref().is_some_and(|e| e.contains("does not exist")));
            }
            other => panic!("expected destination screen, got {other:?}"),
        }
    }
}
