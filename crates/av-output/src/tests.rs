//! Integration tests for av-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{PoseRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn pose_row(vehicle_id: u32, tick: u64) -> PoseRow {
        PoseRow {
            vehicle_id,
            tick,
            x:            vehicle_id as f32 * 10.0,
            y:            0.0,
            yaw:          0.0,
            velocity_mps: 5.0,
            moving:       true,
            waypoint:     vehicle_id,
            arrow:        0,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            unix_time_secs: tick as f64,
            moved_vehicles: tick,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("vehicle_poses.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_poses.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["vehicle_id", "tick", "x", "y", "yaw", "velocity_mps", "moving", "waypoint", "arrow"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "unix_time_secs", "moved_vehicles"]);
    }

    #[test]
    fn csv_pose_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![pose_row(0, 5), pose_row(1, 5), pose_row(2, 5)];
        w.write_poses(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_poses.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "0"); // vehicle_id
        assert_eq!(&read_rows[0][1], "5"); // tick
        assert_eq!(&read_rows[1][2], "10"); // x
        assert_eq!(&read_rows[2][0], "2");
    }

    #[test]
    fn csv_tick_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "3");
        assert_eq!(&read_rows[0][2], "3");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use av_core::{ArrowId, Point, SimConfig, VehicleId, WaypointId};
    use av_map::{RoadMap, RoadMapBuilder};
    use av_schedule::Schedule;
    use av_sim::SimObserver;
    use av_vehicle::VehicleAgent;

    use crate::csv::CsvWriter;
    use crate::SimOutputObserver;

    fn two_waypoint_map() -> RoadMap {
        let mut b = RoadMapBuilder::new();
        let w0 = b.add_waypoint(Point::new(0.0, 0.0), 8.0);
        let w1 = b.add_waypoint(Point::new(50.0, 0.0), 8.0);
        b.add_arrow(vec![w0, w1]).unwrap();
        b.build()
    }

    fn config() -> SimConfig {
        SimConfig {
            start_unix_secs:         100.0,
            tick_interval_secs:      1.0,
            total_ticks:             10,
            snapshot_interval_ticks: 1,
        }
    }

    #[test]
    fn snapshot_writes_one_row_per_vehicle() {
        let dir = TempDir::new().unwrap();
        let map = two_waypoint_map();
        let fleet: Vec<VehicleAgent> = (0..3)
            .map(|i| {
                VehicleAgent::new(
                    VehicleId(i),
                    &map,
                    WaypointId(0),
                    ArrowId(0),
                    4.0,
                    1.0,
                    Schedule::empty(),
                )
                .unwrap()
            })
            .collect();

        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config());
        obs.on_snapshot(2, &fleet);
        obs.on_tick_end(2, 0);
        obs.on_sim_end(2);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_poses.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "2"); // tick
        assert_eq!(&rows[1][6], "0"); // not moving

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][1], "102"); // 100 + 2 · 1
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{PoseRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    #[test]
    fn sqlite_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_poses(&[PoseRow {
            vehicle_id:   1,
            tick:         4,
            x:            7.5,
            y:            0.0,
            yaw:          0.0,
            velocity_mps: 5.0,
            moving:       true,
            waypoint:     7,
            arrow:        0,
        }])
        .unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:           4,
            unix_time_secs: 104.0,
            moved_vehicles: 1,
        })
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let poses: i64 = conn
            .query_row("SELECT COUNT(*) FROM vehicle_poses", [], |r| r.get(0))
            .unwrap();
        assert_eq!(poses, 1);
        let moved: i64 = conn
            .query_row("SELECT moved_vehicles FROM tick_summaries WHERE tick = 4", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(moved, 1);
    }
}
