//! Unit tests for av-schedule.

use av_core::{RouteCode, Timestamp};

use crate::{LegAction, Schedule, ScheduleLeg, TimeWindow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn leg(action: LegAction, start: f64, end: f64) -> ScheduleLeg {
    ScheduleLeg {
        action,
        route: "0:0:2".parse::<RouteCode>().unwrap(),
        window: TimeWindow::new(Timestamp(start), Timestamp(end)),
    }
}

/// Move 100–160, wait 160–220, move 220–300.
fn three_leg_plan() -> Schedule {
    Schedule::from(vec![
        leg(LegAction::Move, 100.0, 160.0),
        leg(LegAction::Wait, 160.0, 220.0),
        leg(LegAction::Move, 220.0, 300.0),
    ])
}

// ── TimeWindow ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod window {
    use super::*;

    #[test]
    fn duration_and_shift() {
        let w = TimeWindow::new(Timestamp(10.0), Timestamp(25.0));
        assert_eq!(w.duration_secs(), 15.0);

        let later = w.shifted_by(5.0);
        assert_eq!(later.start, Timestamp(15.0));
        assert_eq!(later.end, Timestamp(30.0));
        assert_eq!(later.duration_secs(), 15.0);

        let earlier = w.shifted_by(-10.0);
        assert_eq!(earlier.start, Timestamp(0.0));
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule {
    use super::*;

    #[test]
    fn front_and_len() {
        let plan = three_leg_plan();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.front().unwrap().action, LegAction::Move);
        assert!(!plan.is_empty());
    }

    #[test]
    fn empty_plan() {
        let plan = Schedule::empty();
        assert!(plan.is_empty());
        assert!(plan.front().is_none());
    }

    #[test]
    fn shift_moves_every_window() {
        let mut plan = three_leg_plan();
        plan.shift_by(30.0);
        let starts: Vec<f64> = plan.legs().map(|l| l.window.start.0).collect();
        assert_eq!(starts, vec![130.0, 190.0, 250.0]);
    }

    #[test]
    fn finish_front_reanchors_new_front_to_now() {
        let mut plan = three_leg_plan();
        // First leg completes 12 s late, at t=172.
        let done = plan.finish_front(Timestamp(172.0)).unwrap();
        assert_eq!(done.window.start, Timestamp(100.0));

        assert_eq!(plan.len(), 2);
        let front = plan.front().unwrap();
        assert_eq!(front.window.start, Timestamp(172.0), "new front starts at now");
        assert_eq!(front.window.duration_secs(), 60.0, "duration preserved");

        // The leg after it drifts by the same 12 s.
        let last = plan.legs().last().unwrap();
        assert_eq!(last.window.start, Timestamp(232.0));
        assert_eq!(last.window.duration_secs(), 80.0);
    }

    #[test]
    fn finish_front_early_pulls_plan_forward() {
        let mut plan = three_leg_plan();
        // First leg completes 20 s early.
        plan.finish_front(Timestamp(140.0));
        assert_eq!(plan.front().unwrap().window.start, Timestamp(140.0));
        assert_eq!(plan.legs().last().unwrap().window.start, Timestamp(200.0));
    }

    #[test]
    fn finish_front_on_last_leg_leaves_empty_plan() {
        let mut plan = Schedule::from(vec![leg(LegAction::Move, 0.0, 10.0)]);
        let done = plan.finish_front(Timestamp(10.0));
        assert!(done.is_some());
        assert!(plan.is_empty());
        assert!(plan.finish_front(Timestamp(11.0)).is_none());
    }
}

// ── CSV Loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use av_core::WaypointId;

    use crate::load_schedules_reader;

    use super::*;

    const CSV: &[u8] = b"\
vehicle_id,action,start_secs,end_secs,route\n\
0,move,1000.0,1060.0,0:0-1:4\n\
0,wait,1060.0,1120.0,4:1:4\n\
1,move,1000.0,1090.0,2:3:7\n\
";

    #[test]
    fn loads_two_vehicles() {
        let schedules = load_schedules_reader(Cursor::new(CSV), 3).unwrap();
        assert_eq!(schedules.len(), 3);
        assert_eq!(schedules[0].len(), 2);
        assert_eq!(schedules[1].len(), 1);
        assert!(schedules[2].is_empty(), "vehicle 2 absent from CSV");
    }

    #[test]
    fn parses_actions_windows_and_routes() {
        let schedules = load_schedules_reader(Cursor::new(CSV), 2).unwrap();
        let front = schedules[0].front().unwrap();
        assert_eq!(front.action, LegAction::Move);
        assert_eq!(front.window.start, Timestamp(1000.0));
        assert_eq!(front.window.end, Timestamp(1060.0));
        assert_eq!(front.route.start, WaypointId(0));
        assert_eq!(front.route.goal, WaypointId(4));
        assert_eq!(front.route.arrows.len(), 2);

        let wait = schedules[0].legs().nth(1).unwrap();
        assert_eq!(wait.action, LegAction::Wait);
    }

    #[test]
    fn invalid_action_errors() {
        let bad = b"\
vehicle_id,action,start_secs,end_secs,route\n\
0,loiter,0.0,1.0,0:0:1\n\
";
        assert!(load_schedules_reader(Cursor::new(bad.as_slice()), 1).is_err());
    }

    #[test]
    fn invalid_route_code_errors() {
        let bad = b"\
vehicle_id,action,start_secs,end_secs,route\n\
0,move,0.0,1.0,not-a-route\n\
";
        assert!(load_schedules_reader(Cursor::new(bad.as_slice()), 1).is_err());
    }
}
