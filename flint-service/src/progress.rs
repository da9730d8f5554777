//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use pbr::ProgressBar;
use std::io::Stdout;

/// Progress bar counting tiles, `None` in quiet mode
pub fn progress_bar(msg: &str, total: u64, quiet: bool) -> Option<ProgressBar<Stdout>> {
    if quiet {
        return None;
    }
    let mut pb = ProgressBar::new(total);
    pb.message(msg);
    pb.show_speed = false;
    pb.show_percent = false;
    pb.show_time_left = false;
    pb.tick();
    Some(pb)
}
