use garden_wire::package::{
    Aggregation, Certificate, Data, ErrorMessage, Schedule, Station, Status, Synchro,
};
use garden_wire::{
    Error, Flags, Frame, MAX_FRAME_PAYLOAD, Package, PackageKind, compose, decode, encode,
    encode_to_bytes, is_complete, tag_transmission_id, tag_transmission_id_all,
};

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        const A: u64 = 6364136223846793005;
        const C: u64 = 1442695040888963407;
        self.0 = self.0.wrapping_mul(A).wrapping_add(C);
        self.0
    }

    fn text(&mut self, len: usize) -> String {
        const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 -_";
        (0..len)
            .map(|_| ALPHABET[(self.next() >> 33) as usize % ALPHABET.len()] as char)
            .collect()
    }
}

/// Send every frame through bytes, tag it, decode it on the other side
fn over_the_wire(frames: &[Frame], id: u8) -> Vec<Frame> {
    let mut buffers: Vec<Vec<u8>> = frames.iter().map(Frame::to_bytes).collect();
    tag_transmission_id_all(&mut buffers, id).unwrap();
    buffers.iter().map(|b| decode(b).unwrap()).collect()
}

#[test]
fn synchro_with_ack_is_one_frame() {
    let package = Package::from(Synchro::new("serial123456789"));
    let frames = encode(&package, Flags::ACK).unwrap();

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].flags(), Flags::new(PackageKind::Synchro).with(Flags::ACK));
    assert_eq!(frames[0].flags().as_u8(), PackageKind::Synchro.as_u8() | Flags::ACK);

    let received = over_the_wire(&frames, 3);
    let (kind, decoded) = compose(&received).unwrap();
    assert_eq!(kind, PackageKind::Synchro);
    match decoded {
        Package::Synchro(syn) => assert_eq!(syn.serial, "serial123456789"),
        other => panic!("unexpected package: {other}"),
    }
}

#[test]
fn error_message_of_260_bytes_fragments_into_three_frames() {
    let message = Lcg(0x5eed).text(260);
    let package = Package::from(ErrorMessage::new(message.clone()));
    let frames = encode(&package, Flags::ACK).unwrap();

    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].length(), 255);
    assert_eq!(frames[1].length(), 5);

    let data_flags = Flags::new(PackageKind::Error).with(Flags::ACK).with(Flags::CHUNK);
    assert_eq!(frames[0].flags(), data_flags);
    assert_eq!(frames[1].flags(), data_flags);
    assert_eq!(
        frames[2].flags(),
        Flags::new(PackageKind::Finish).with(Flags::ACK).with(Flags::CHUNK)
    );
    assert_eq!(frames[2].length(), 0);

    let mut joined = frames[0].payload().to_vec();
    joined.extend_from_slice(frames[1].payload());
    assert_eq!(joined, message.as_bytes());

    let (kind, decoded) = compose(&over_the_wire(&frames, 200)).unwrap();
    assert_eq!(kind, PackageKind::Error);
    assert_eq!(decoded, package);
}

#[test]
fn completeness_checked_frame_by_frame() {
    let package = Package::from(Data::new(vec![7u8; 1000]));
    let frames = encode(&package, 0).unwrap();
    let (last, data) = frames.split_last().unwrap();

    assert!(is_complete(None));
    for frame in data {
        assert!(!is_complete(Some(frame)));
    }
    assert!(is_complete(Some(last)));

    let single = encode(&Package::from(Synchro::new("x")), 0).unwrap();
    assert!(is_complete(single.first()));
}

#[test]
fn collecting_until_complete_then_composing() {
    let station = Station {
        id: 12,
        name: "orchard".into(),
        description: "drip line along the apple trees".into(),
        relay_number: 5,
        watering_time: 900,
        watering_time_left: 0,
        weight: 1,
        status: Status::Active,
    };
    let aggregation = Aggregation {
        id: 4,
        description: "evening".into(),
        manual: false,
        schedule: Schedule {
            minute: 45,
            hour: 20,
            days: 0b0101_0101,
        },
        ..Aggregation::default()
    };
    let certificate = Certificate::new(Lcg(7).text(700));

    for package in [
        Package::from(station),
        Package::from(aggregation),
        Package::from(certificate),
    ] {
        let wire = encode_to_bytes(&package, Flags::ACK).unwrap();

        let mut collected = Vec::new();
        for buffer in &wire {
            let frame = decode(buffer).unwrap();
            let done = frame.is_complete();
            collected.push(frame);
            if done {
                break;
            }
        }

        assert_eq!(collected.len(), wire.len());
        let (kind, decoded) = compose(&collected).unwrap();
        assert_eq!(kind, package.kind());
        assert_eq!(decoded, package);
    }
}

#[test]
fn fragmentation_limit_is_sixteen_chunks() {
    let largest = Package::from(ErrorMessage::new("m".repeat(MAX_FRAME_PAYLOAD * 16)));
    let frames = encode(&largest, 0).unwrap();
    assert_eq!(frames.len(), 17);
    assert_eq!(compose(&frames).unwrap().1, largest);

    let too_large = Package::from(ErrorMessage::new("m".repeat(MAX_FRAME_PAYLOAD * 16 + 1)));
    assert!(matches!(
        encode(&too_large, 0),
        Err(Error::TooManyFragments { .. })
    ));
}

#[test]
fn corrupted_chunk_is_caught_before_reassembly() {
    let package = Package::from(Data::new(vec![0x42; 400]));
    let mut wire = encode_to_bytes(&package, 0).unwrap();

    wire[1][10] ^= 0x04;
    assert!(matches!(decode(&wire[1]), Err(Error::ChecksumMismatch { .. })));
    assert!(decode(&wire[0]).is_ok());
}

#[test]
fn tagging_reseals_checksum() {
    let package = Package::from(Synchro::new("abc"));
    let mut wire = encode_to_bytes(&package, 0).unwrap();

    tag_transmission_id(&mut wire[0], 0xFE).unwrap();
    let frame = decode(&wire[0]).unwrap();
    assert_eq!(frame.id(), 0xFE);
    assert_eq!(frame.checksum(), frame.compute_checksum());
}
