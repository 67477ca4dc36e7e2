use super::body::{BodyEntries, CourseDescriptor, ScheduleDescriptor};
use crate::models::CourseRecord;

/// 按位置把课程行与时间行合并为课程记录
///
/// 第 i 门课程取第 i 条时间行；时间行不足时对应字段为空字符串。
/// 结果顺序与课程行出现顺序一致。
pub fn assemble_courses(entries: BodyEntries) -> Vec<CourseRecord> {
    let BodyEntries { courses, schedules } = entries;
    let mut schedules = schedules.into_iter();

    courses
        .into_iter()
        .map(|course| {
            let CourseDescriptor {
                code,
                title,
                credits,
                group,
            } = course;
            let ScheduleDescriptor { schedule, location } =
                schedules.next().unwrap_or_else(|| ScheduleDescriptor {
                    schedule: String::new(),
                    location: String::new(),
                });

            CourseRecord {
                code,
                title,
                credits,
                group,
                schedule,
                location,
            }
        })
        .collect()
}
