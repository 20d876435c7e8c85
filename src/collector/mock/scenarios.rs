//! Fixture proc trees for collector and renderer tests.
//!
//! These scenarios provide realistic `/proc` states rooted at `/proc`,
//! plus an `/etc/passwd` for owner name resolution.

use super::filesystem::MockFs;

const PASSWD: &str = "\
root:x:0:0:root:/root:/bin/sh
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
user:x:1000:1000:Test User,,,:/home/user:/bin/zsh
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin
";

const CPUINFO: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 142
model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz
stepping\t: 10
cpu MHz\t\t: 1992.002
cache size\t: 8192 KB

processor\t: 1
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 142
model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz
stepping\t: 10
cpu MHz\t\t: 1992.002
cache size\t: 8192 KB
";

/// Builds a `status` file in the kernel's layout.
pub fn status_file(name: &str, state: &str, pid: u32, ppid: u32, threads: u32) -> String {
    format!(
        "Name:\t{name}\n\
         Umask:\t0022\n\
         State:\t{state}\n\
         Tgid:\t{pid}\n\
         Ngid:\t0\n\
         Pid:\t{pid}\n\
         PPid:\t{ppid}\n\
         TracerPid:\t0\n\
         Uid:\t0\t0\t0\t0\n\
         Gid:\t0\t0\t0\t0\n\
         FDSize:\t64\n\
         VmRSS:\t    4096 kB\n\
         Threads:\t{threads}\n\
         voluntary_ctxt_switches:\t150\n"
    )
}

impl MockFs {
    /// Creates a typical system: identity files, two logical CPUs, 16 GiB of
    /// memory with a quarter active, and four tasks.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/etc/passwd", PASSWD);

        fs.add_file("/proc/sys/kernel/hostname", "testbox\n");
        fs.add_file("/proc/sys/kernel/osrelease", "6.1.0-18-amd64\n");
        fs.add_file("/proc/uptime", "90061.52 170000.10\n");
        fs.add_file("/proc/cpuinfo", CPUINFO);
        fs.add_file("/proc/loadavg", "0.42 0.31 0.27 2/611 48213\n");
        fs.add_file(
            "/proc/stat",
            "\
cpu  24310 118 9102 611540 2231 0 417 0 0 0
cpu0 12402 61 4498 305911 1190 0 233 0 0 0
cpu1 11908 57 4604 305629 1041 0 184 0 0 0
intr 3815522 9 0 0 0 0
ctxt 7301265
btime 1712563020
processes 48213
procs_running 3
procs_blocked 0
",
        );
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16777216 kB
MemFree:         9961472 kB
MemAvailable:   11534336 kB
Buffers:          286720 kB
Cached:          1835008 kB
SwapCached:          512 kB
Active:          4194304 kB
Inactive:        1638400 kB
Active(anon):    2621440 kB
Inactive(anon):   131072 kB
SwapTotal:       2097148 kB
SwapFree:        2096636 kB
",
        );

        fs.add_task(
            "/proc",
            1,
            &status_file("systemd", "S (sleeping)", 1, 0, 1),
            0,
        );
        fs.add_task(
            "/proc",
            1234,
            &status_file("bash", "S (sleeping)", 1234, 1233, 1),
            1000,
        );
        fs.add_task(
            "/proc",
            2048,
            &status_file("rpc-worker", "R (running)", 2048, 1, 12),
            65534,
        );
        fs.add_task(
            "/proc",
            4000,
            &status_file("defunct", "Z (zombie)", 4000, 1234, 1),
            1000,
        );

        // Non-task entries that enumeration must skip.
        fs.add_dir("/proc/self");
        fs.add_dir("/proc/sys/vm");
        fs.add_file("/proc/version", "Linux version 6.1.0-18-amd64\n");

        fs
    }

    /// Same identity as [`MockFs::typical_system`] with idle counters frozen,
    /// so two samples yield no counter movement.
    pub fn idle_system() -> Self {
        let mut fs = Self::typical_system();
        fs.add_file("/proc/stat", "cpu  0 0 0 0 0 0 0 0 0 0\n");
        fs
    }

    /// A system where many files are missing or truncated.
    ///
    /// Hostname and `cpuinfo` are absent, `meminfo` lacks `Active:`, one
    /// task's status has no `Threads:` line and another is unreadable.
    pub fn sparse_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/etc/passwd", PASSWD);
        fs.add_file("/proc/sys/kernel/osrelease", "5.15.0\n");
        fs.add_file("/proc/uptime", "59.99 10.00\n");
        fs.add_file("/proc/loadavg", "1.00 0.50\n");
        fs.add_file("/proc/stat", "intr 1000\nctxt 42\n");
        fs.add_file("/proc/meminfo", "MemTotal:        8388608 kB\n");

        fs.add_task(
            "/proc",
            10,
            "Name:\tnothreads\nState:\tI (idle)\nPid:\t10\nPPid:\t2\nTracerPid:\t0\n",
            0,
        );
        fs.add_task(
            "/proc",
            11,
            &status_file("hidden", "S (sleeping)", 11, 1, 3),
            0,
        );
        fs.deny("/proc/11/status");

        fs
    }
}
