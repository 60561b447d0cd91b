mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_level_control::{DeadlineScheduler, TickDirective, TickScheduler};

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn test_tick_fires_at_deadline() {
        let mut scheduler = DeadlineScheduler::new();
        scheduler.observe(Instant::from_millis(0));
        scheduler.schedule_tick(PERIOD);

        assert_eq!(scheduler.deadline(), Some(Instant::from_millis(100)));
        assert!(!scheduler.poll_due(Instant::from_millis(50)));
        assert_eq!(
            scheduler.sleep_duration(Instant::from_millis(50)),
            Some(Duration::from_millis(50))
        );
        assert!(scheduler.poll_due(Instant::from_millis(100)));
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.sleep_duration(Instant::from_millis(100)), None);
    }

    #[test]
    fn test_late_tick_keeps_cadence() {
        let mut scheduler = DeadlineScheduler::new();
        scheduler.observe(Instant::from_millis(0));
        scheduler.schedule_tick(PERIOD);

        assert!(scheduler.poll_due(Instant::from_millis(130)));
        scheduler.schedule_tick(PERIOD);
        assert_eq!(scheduler.deadline(), Some(Instant::from_millis(200)));
    }

    #[test]
    fn test_stalled_tick_skips_backlog() {
        let mut scheduler = DeadlineScheduler::new();
        scheduler.observe(Instant::from_millis(0));
        scheduler.schedule_tick(PERIOD);

        assert!(scheduler.poll_due(Instant::from_millis(900)));
        scheduler.schedule_tick(PERIOD);
        assert_eq!(scheduler.deadline(), Some(Instant::from_millis(1000)));
        assert_eq!(
            scheduler.sleep_duration(Instant::from_millis(1200)),
            Some(Duration::from_millis(0))
        );
    }

    #[test]
    fn test_directive_apply() {
        let mut scheduler = DeadlineScheduler::new();
        scheduler.observe(Instant::from_millis(10));

        TickDirective::Schedule(PERIOD).apply(&mut scheduler);
        assert_eq!(scheduler.deadline(), Some(Instant::from_millis(110)));

        TickDirective::Cancel.apply(&mut scheduler);
        assert!(!scheduler.is_armed());
        assert!(!scheduler.poll_due(Instant::from_millis(500)));
    }
}
