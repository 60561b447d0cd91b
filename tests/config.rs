mod tests {
    use myrtio_level_control::config::OnOffTransition;
    use myrtio_level_control::{
        Direction, LevelCommand, LevelControlConfig, OnLevel, TransitionTime, TransitionTimings,
    };

    #[test]
    fn test_transition_time_from_raw() {
        assert_eq!(TransitionTime::from_raw(0xFFFF), TransitionTime::Default);
        assert_eq!(TransitionTime::from_raw(0), TransitionTime::Ticks(0));
        assert_eq!(TransitionTime::from_raw(25).to_raw(), 25);
        assert_eq!(TransitionTime::Default.to_raw(), 0xFFFF);
    }

    #[test]
    fn test_on_level_from_raw() {
        assert_eq!(OnLevel::from_raw(0xFF), OnLevel::Restore);
        assert_eq!(OnLevel::from_raw(128), OnLevel::Level(128));
        assert_eq!(OnLevel::Restore.to_raw(), 0xFF);
    }

    #[test]
    fn test_resolve_explicit_time() {
        let timings = TransitionTimings {
            on: TransitionTime::Ticks(30),
            ..TransitionTimings::default()
        };
        assert_eq!(
            timings.resolve(TransitionTime::Ticks(7), OnOffTransition::TurningOn),
            7
        );
        assert_eq!(
            timings.resolve(TransitionTime::Ticks(0), OnOffTransition::TurningOn),
            1
        );
    }

    #[test]
    fn test_resolve_default_hierarchy() {
        let timings = TransitionTimings {
            on: TransitionTime::Ticks(30),
            off: TransitionTime::Default,
            on_off: TransitionTime::Ticks(12),
        };
        assert_eq!(
            timings.resolve(TransitionTime::Default, OnOffTransition::TurningOn),
            30
        );
        assert_eq!(
            timings.resolve(TransitionTime::Default, OnOffTransition::TurningOff),
            12
        );
        assert_eq!(
            TransitionTimings::default()
                .resolve(TransitionTime::Default, OnOffTransition::TurningOff),
            1
        );
    }

    #[test]
    fn test_resolve_configured_zero_is_fastest() {
        let timings = TransitionTimings {
            off: TransitionTime::Ticks(0),
            ..TransitionTimings::default()
        };
        assert_eq!(
            timings.resolve(TransitionTime::Default, OnOffTransition::TurningOff),
            1
        );
    }

    #[test]
    fn test_default_config() {
        let config = LevelControlConfig::default();
        assert_eq!(config.on_level, OnLevel::Restore);
        assert_eq!(config.tick_period.as_millis(), 100);
        assert_eq!(config.default_move_rate, None);
        assert!(!config.start_on);
        assert!(!config.report_level_on_stop);
    }

    #[test]
    fn test_command_from_raw() {
        assert_eq!(
            LevelCommand::move_to_level_raw(255, 0xFFFF, true),
            LevelCommand::MoveToLevel {
                level: 254,
                transition_time: TransitionTime::Default,
                with_on_off: true,
            }
        );
        assert_eq!(
            LevelCommand::move_raw(1, 10, false),
            Some(LevelCommand::Move {
                direction: Direction::Down,
                rate_per_second: 10,
                with_on_off: false,
            })
        );
        assert_eq!(LevelCommand::move_raw(3, 10, false), None);
        assert_eq!(
            LevelCommand::step_raw(0, 5, 20, false),
            Some(LevelCommand::Step {
                direction: Direction::Up,
                amount: 5,
                transition_time: TransitionTime::Ticks(20),
                with_on_off: false,
            })
        );
        assert_eq!(LevelCommand::on_off_from_raw(2), Some(LevelCommand::Toggle));
        assert_eq!(LevelCommand::on_off_from_raw(9), None);
        assert!(LevelCommand::Off.is_on_off());
        assert!(!LevelCommand::Stop.is_on_off());
    }

    #[test]
    fn test_direction_names() {
        assert_eq!(Direction::parse_from_str("down"), Some(Direction::Down));
        assert_eq!(Direction::Up.as_str(), "up");
        assert_eq!(Direction::parse_from_str("sideways"), None);
    }
}
